use std::path::PathBuf;

use treepath::{Evaluator, PrintTracer, Verbosity};

use super::document_loader::load_document;
use super::run_common::compile_or_exit;

pub struct ExecArgs {
    pub path: String,
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub pretty: bool,
    pub trace: Option<Verbosity>,
    pub recursion_fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: ExecArgs) {
    let pipeline = compile_or_exit(&args.path, args.recursion_fuel, args.color);

    let document = load_document(args.document_text.as_deref(), args.document_path.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(1);
        });

    let evaluator = Evaluator::new(&pipeline);
    let found = match args.trace {
        Some(verbosity) => {
            let mut tracer = PrintTracer::new(verbosity);
            let found = evaluator.apply_with(&document, &mut tracer);
            tracer.print();
            found
        }
        None => evaluator.apply(&document),
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&found)
    } else {
        serde_json::to_string(&found)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}
