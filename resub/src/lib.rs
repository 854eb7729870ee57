//! resub — a small regex engine for classifying and rewriting strings
//!
//! Compile a pattern once, execute it against subjects to get captured
//! byte spans, and expand a rewrite template from the captures:
//!
//! ```
//! use resub::{Regex, substitute};
//!
//! let re = Regex::new("^([^!]+)@([^!@]+)$").unwrap();
//! let caps = re.exec("joe@example").unwrap();
//! assert_eq!(substitute(r"\2!\1", "joe@example", &caps).unwrap(), "example!joe");
//! ```
//!
//! Or drive an ordered rule table, first match wins:
//!
//! ```
//! use resub::RuleSet;
//!
//! let rules = RuleSet::from_pairs([
//!     ("^local!(.*)$", r"/mail/box/\1/mbox"),
//!     ("^(.*)$", "inet!&"),
//! ]).unwrap();
//! assert_eq!(rules.rewrite("local!joe").unwrap().unwrap().output, "/mail/box/joe/mbox");
//! ```
//!
//! Matching is leftmost-first: positions are tried from 0 upward, and
//! within an attempt alternatives and greedy quantifiers are explored in
//! source order, accepting the first successful path (not the longest).

pub mod ast;
pub mod engine;
pub mod error;
pub mod parser;
pub mod prog;
pub mod rules;
pub mod runes;
pub mod subst;

pub use ast::{ClassSet, Expr, Quantifier};
pub use engine::{Captures, Regex};
pub use error::{CompileError, Result, SubstError};
pub use parser::{parse, Parser};
pub use prog::{Inst, Program};
pub use rules::{Rewrite, Rule, RuleSet};
pub use runes::{rune_count, rune_count_bytes};
pub use subst::{substitute, Template, TemplatePart};

/// Capture slots per match: group 0 (the whole match) plus groups 1-9.
pub const MAX_GROUPS: usize = 10;

/// Compile a pattern.
///
/// Shorthand for [`Regex::new`].
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
}
