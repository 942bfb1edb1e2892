//! Shared logic for commands that compile a path.

use treepath::{Compiler, Pipeline};

/// Compiles `path` or exits with the rendered error.
pub fn compile_or_exit(path: &str, recursion_fuel: Option<u32>, color: bool) -> Pipeline {
    match Compiler::new(path).with_recursion_fuel(recursion_fuel).compile() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("{}", e.render(path, color));
            std::process::exit(1);
        }
    }
}
