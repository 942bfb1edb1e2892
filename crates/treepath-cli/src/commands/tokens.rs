use treepath::{LexemeKind, Lexer};

pub struct TokensArgs {
    pub path: String,
}

pub fn run(args: TokensArgs) {
    let mut failed = false;
    for lexeme in Lexer::new(&args.path) {
        println!("{:>3} {:?} {:?}", lexeme.offset, lexeme.kind, lexeme.value);
        failed |= lexeme.kind == LexemeKind::Error;
    }
    if failed {
        std::process::exit(1);
    }
}
