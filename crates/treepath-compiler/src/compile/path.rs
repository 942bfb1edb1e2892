//! Path segments.

use treepath_core::{Pipeline, Stage};

use super::Parser;
use crate::error::{CompileError, Result};
use crate::lexer::LexemeKind;
use crate::subscript::parse_array_subscript;

impl<'a> Parser<'a> {
    /// Top-level path: `Root segment* Identity`, or a lone `Identity`.
    pub(super) fn path(&mut self) -> Result<Pipeline> {
        let mut stages = Vec::new();
        if self.eat(LexemeKind::Root) {
            stages.push(Stage::Root);
            self.segments(&mut stages)?;
        }
        self.expect(LexemeKind::Identity)?;
        stages.push(Stage::Identity);
        Ok(Pipeline::new(stages))
    }

    /// Filter operand path after `@` (relative) or `$` (rooted).
    pub(super) fn sub_path(&mut self, rooted: bool) -> Result<Pipeline> {
        let mut stages = Vec::new();
        if rooted {
            stages.push(Stage::Root);
        }
        self.segments(&mut stages)?;
        Ok(Pipeline::new(stages))
    }

    /// Consumes segments until a lexeme that cannot continue a path.
    fn segments(&mut self, stages: &mut Vec<Stage>) -> Result<()> {
        loop {
            let stage = match self.current_kind() {
                LexemeKind::DotChild => {
                    let name = self.bump_value(1);
                    if name == "*" {
                        Stage::Wildcard
                    } else {
                        Stage::DotChild(name)
                    }
                }
                LexemeKind::RecursiveDescent => {
                    let name = self.bump_value(2);
                    if name == "*" {
                        Stage::DescendantWildcard
                    } else {
                        Stage::RecursiveDescent(name)
                    }
                }
                LexemeKind::BracketChild => {
                    let quoted = self.bump_value(1);
                    let name = quoted
                        .strip_prefix('\'')
                        .and_then(|s| s.strip_suffix("']"))
                        .unwrap_or(&quoted);
                    Stage::BracketChild(name.to_string())
                }
                LexemeKind::ArraySubscript => {
                    let offset = self.current_offset();
                    let raw = self.bump_value(0);
                    parse_array_subscript(&raw)
                        .map_err(|message| CompileError::new(message, offset))?
                }
                LexemeKind::FilterBegin => {
                    self.bump();
                    Stage::Filter(self.filter()?)
                }
                _ => return Ok(()),
            };
            stages.push(stage);
        }
    }

    /// Consumes the current lexeme, returning its text without the first
    /// `prefix` bytes.
    pub(super) fn bump_value(&mut self, prefix: usize) -> String {
        self.bump()
            .map(|lexeme| lexeme.value.get(prefix..).unwrap_or_default().to_string())
            .unwrap_or_default()
    }
}
