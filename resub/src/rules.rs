//! Ordered rewrite rule tables
//!
//! A rule pairs a compiled pattern with a rewrite template. A [`RuleSet`]
//! is a caller-owned, priority-ordered list of rules; rewriting an input
//! tries the rules in order and applies the first one whose pattern
//! matches. Patterns are compiled once, when the rule is built, and the
//! set holds no global or mutable state.

use crate::engine::Regex;
use crate::error::{CompileError, SubstError};
use crate::subst::Template;

/// A single pattern/template rewrite rule
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    template: Template,
}

impl Rule {
    /// Compile a rule from pattern source and a template string.
    pub fn new(pattern: &str, template: &str) -> Result<Self, CompileError> {
        Ok(Rule {
            regex: Regex::new(pattern)?,
            template: Template::parse(template),
        })
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The parsed template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Apply this rule alone: `None` if the pattern does not match.
    pub fn apply(&self, input: &str) -> Result<Option<String>, SubstError> {
        match self.regex.exec(input) {
            Some(captures) => self.template.apply(input, &captures).map(Some),
            None => Ok(None),
        }
    }
}

/// The result of a successful table rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Index of the rule that fired
    pub index: usize,
    /// The rewritten string
    pub output: String,
}

/// A priority-ordered list of rewrite rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Build a set from (pattern, template) pairs, in priority order.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = RuleSet::new();
        for (pattern, template) in pairs {
            set.push(Rule::new(pattern, template)?);
        }
        Ok(set)
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite `input` with the first matching rule.
    ///
    /// `Ok(None)` means no rule matched. A substitution error from the
    /// firing rule is surfaced to the caller; later rules are not tried.
    pub fn rewrite(&self, input: &str) -> Result<Option<Rewrite>, SubstError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(output) = rule.apply(input)? {
                return Ok(Some(Rewrite { index, output }));
            }
        }
        Ok(None)
    }
}
