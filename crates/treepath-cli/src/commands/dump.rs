use super::run_common::compile_or_exit;

pub struct DumpArgs {
    pub path: String,
    pub recursion_fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let pipeline = compile_or_exit(&args.path, args.recursion_fuel, args.color);
    print!("{}", pipeline.dump());
}
