use super::run_common::compile_or_exit;

pub struct CheckArgs {
    pub path: String,
    pub recursion_fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    compile_or_exit(&args.path, args.recursion_fuel, args.color);

    // Silent on success (like cargo check)
}
