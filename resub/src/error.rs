//! Error types for the rewrite engine
//!
//! Compilation errors are always reported before a `Program` is produced;
//! "no match" is not an error. Substitution has exactly one failure mode:
//! a backreference to a group the pattern never declared.

use thiserror::Error;

/// Convenience result alias for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors reported while compiling a pattern.
///
/// Positions are byte offsets into the pattern source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Unbalanced `(` or `)`
    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParen(usize),

    /// A `[` with no closing `]`
    #[error("unterminated character class starting at position {0}")]
    UnclosedClass(usize),

    /// A class with no members, `[]` or `[^]`
    #[error("empty character class at position {0}")]
    EmptyClass(usize),

    /// A range whose end sorts before its start, e.g. `[z-a]`
    #[error("invalid class range '{start}-{end}' at position {pos}")]
    InvalidClassRange {
        /// First character of the range
        start: char,
        /// Last character of the range
        end: char,
        /// Position of the range start
        pos: usize,
    },

    /// More capturing groups than substitution can address
    #[error("more than {} capturing groups", crate::MAX_GROUPS - 1)]
    TooManyGroups,

    /// A quantifier with nothing to repeat, e.g. `*ab` or `a|+b`
    #[error("quantifier '{ch}' has no preceding atom at position {pos}")]
    DanglingQuantifier {
        /// The offending quantifier character
        ch: char,
        /// Its position
        pos: usize,
    },

    /// The pattern ends in an unescaped `\`
    #[error("trailing backslash")]
    TrailingEscape,
}

/// Errors reported while substituting captures into a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstError {
    /// The template names `\N` but the pattern declared fewer groups.
    ///
    /// A group that exists but did not participate in the match is not an
    /// error; it substitutes as the empty string.
    #[error("template references group {group} but the pattern declares only {declared}")]
    UndefinedGroup {
        /// The group number the template asked for
        group: u8,
        /// How many groups the pattern declared
        declared: usize,
    },
}
