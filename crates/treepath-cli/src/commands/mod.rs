pub mod check;
pub mod document_loader;
pub mod dump;
pub mod exec;
pub mod run_common;
pub mod tokens;
