//! Compilation error and its source-annotated rendering.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

/// A path failed to compile.
///
/// Displays as the bare message, which is the same text the lexer's `Error`
/// lexeme carries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    message: String,
    offset: usize,
}

impl CompileError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset in the path where the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Renders the error with the offending path underlined.
    pub fn render(&self, source: &str, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let start = self.offset.min(source.len());
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());

        let snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end));
        let report = [Level::ERROR.primary_title(self.message.as_str()).element(snippet)];
        renderer.render(&report).to_string()
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
