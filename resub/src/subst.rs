//! Rewrite template handling
//!
//! A template is literal text interleaved with backreference markers:
//! - `&` — the whole match
//! - `\1` .. `\9` — the span of capture group N
//! - `\\` — a literal backslash
//! - `\&` (or any other `\c`) — the literal character `c`
//!
//! Output is built in a growing `String`; there is no fixed output cap
//! and no overflow failure mode.

use crate::engine::Captures;
use crate::error::SubstError;

/// A part of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text, copied verbatim
    Literal(String),
    /// `&`: the whole match (capture 0)
    WholeMatch,
    /// `\N`: capture group N, 1-9
    Group(u8),
}

/// A parsed rewrite template
///
/// Parsing cannot fail; a reference to a group the pattern never declared
/// is only detectable against a concrete match, so it is reported by
/// [`Template::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parse a template string.
    pub fn parse(template: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            match c {
                '&' => {
                    flush(&mut parts, &mut literal);
                    parts.push(TemplatePart::WholeMatch);
                }
                '\\' => match chars.next() {
                    Some(d @ '1'..='9') => {
                        flush(&mut parts, &mut literal);
                        parts.push(TemplatePart::Group(d as u8 - b'0'));
                    }
                    // \\ and escape-of-non-special both pass the
                    // character through literally.
                    Some(other) => literal.push(other),
                    // A lone trailing backslash is itself literal.
                    None => literal.push('\\'),
                },
                _ => literal.push(c),
            }
        }

        flush(&mut parts, &mut literal);
        Template { parts }
    }

    /// Expand the template using the captures of a match against `subject`.
    ///
    /// A group that exists in the pattern but did not participate expands
    /// to nothing; a group the pattern never declared is an error.
    pub fn apply(&self, subject: &str, captures: &Captures) -> Result<String, SubstError> {
        let mut out = String::new();

        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::WholeMatch => {
                    let (start, end) = captures.span();
                    out.push_str(&subject[start..end]);
                }
                TemplatePart::Group(n) => {
                    if *n as usize > captures.group_count() {
                        return Err(SubstError::UndefinedGroup {
                            group: *n,
                            declared: captures.group_count(),
                        });
                    }
                    if let Some(text) = captures.group_str(subject, *n as usize) {
                        out.push_str(text);
                    }
                }
            }
        }

        Ok(out)
    }

    /// The parsed parts.
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }
}

fn flush(parts: &mut Vec<TemplatePart>, literal: &mut String) {
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
}

/// Expand `template` in one call using the captures of a match against
/// `subject`.
pub fn substitute(
    template: &str,
    subject: &str,
    captures: &Captures,
) -> Result<String, SubstError> {
    Template::parse(template).apply(subject, captures)
}
