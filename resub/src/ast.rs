//! Abstract syntax tree for parsed patterns
//!
//! The parser produces an [`Expr`] tree; [`crate::prog`] lowers it to an
//! instruction sequence. Supported syntax:
//! - Literals, `.`, character classes with ranges and negation
//! - Greedy quantifiers (`*`, `+`, `?`)
//! - Capturing groups `(...)`, at most nine, numbered by source order
//! - Alternation (`|`)
//! - Anchors (`^`, `$`)

/// An expression in the AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Empty expression (matches the empty string)
    Empty,

    /// A literal character
    Literal(char),

    /// Any character except newline (dot)
    Any,

    /// A sequence of expressions (concatenation)
    Sequence(Vec<Expr>),

    /// Alternation (e.g., a|b|c)
    Alternation(Vec<Expr>),

    /// A character class [abc], [^abc], [a-z]
    Class(ClassSet),

    /// Quantified expression (a*, a+, a?)
    Quantified {
        /// The expression being repeated
        expr: Box<Expr>,
        /// The quantifier
        quantifier: Quantifier,
    },

    /// A capturing group: (...)
    ///
    /// `index` is the group number (1-9), assigned by source order of `(`.
    Group {
        /// Group number, 1-based
        index: u8,
        /// The pattern inside the group
        expr: Box<Expr>,
    },

    /// Start of subject anchor (^)
    StartAnchor,

    /// End of subject anchor ($)
    EndAnchor,
}

/// A character class `[abc]`, `[^abc]`, or `[a-z]`
///
/// Single characters are stored as degenerate ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSet {
    /// Whether the class is negated [^...]
    pub negated: bool,
    /// Inclusive character ranges
    pub ranges: Vec<(char, char)>,
}

impl ClassSet {
    /// Whether `c` is accepted by this class.
    ///
    /// A negated class accepts anything not listed, including newline;
    /// only `.` excludes newline.
    pub fn matches(&self, c: char) -> bool {
        let listed = self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c));
        listed != self.negated
    }
}

/// A greedy quantifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Zero or more (*)
    ZeroOrMore,
    /// One or more (+)
    OneOrMore,
    /// Zero or one (?)
    Optional,
}

impl Expr {
    /// Create a literal expression
    pub fn literal(c: char) -> Self {
        Expr::Literal(c)
    }

    /// Create a sequence from a vector of expressions
    pub fn sequence(exprs: Vec<Expr>) -> Self {
        match exprs.len() {
            0 => Expr::Empty,
            1 => exprs.into_iter().next().unwrap(),
            _ => Expr::Sequence(exprs),
        }
    }

    /// Create an alternation from a vector of expressions
    pub fn alternation(exprs: Vec<Expr>) -> Self {
        match exprs.len() {
            0 => Expr::Empty,
            1 => exprs.into_iter().next().unwrap(),
            _ => Expr::Alternation(exprs),
        }
    }

    /// Create a quantified expression
    pub fn quantified(expr: Expr, quantifier: Quantifier) -> Self {
        Expr::Quantified {
            expr: Box::new(expr),
            quantifier,
        }
    }

    /// Create a capturing group
    pub fn group(index: u8, expr: Expr) -> Self {
        Expr::Group {
            index,
            expr: Box::new(expr),
        }
    }

    /// Whether every match of this expression must begin at subject start.
    ///
    /// Conservative: used only to skip useless scan positions, the
    /// compiled assert instructions remain authoritative.
    pub fn is_start_anchored(&self) -> bool {
        match self {
            Expr::StartAnchor => true,
            Expr::Sequence(exprs) => exprs.first().is_some_and(Expr::is_start_anchored),
            Expr::Alternation(exprs) => exprs.iter().all(Expr::is_start_anchored),
            Expr::Group { expr, .. } => expr.is_start_anchored(),
            _ => false,
        }
    }

    /// Whether every match of this expression must end at subject end.
    pub fn is_end_anchored(&self) -> bool {
        match self {
            Expr::EndAnchor => true,
            Expr::Sequence(exprs) => exprs.last().is_some_and(Expr::is_end_anchored),
            Expr::Alternation(exprs) => exprs.iter().all(Expr::is_end_anchored),
            Expr::Group { expr, .. } => expr.is_end_anchored(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_collapses() {
        assert_eq!(Expr::sequence(vec![]), Expr::Empty);
        assert_eq!(Expr::sequence(vec![Expr::literal('a')]), Expr::Literal('a'));
        assert!(matches!(
            Expr::sequence(vec![Expr::literal('a'), Expr::literal('b')]),
            Expr::Sequence(_)
        ));
    }

    #[test]
    fn test_class_matches() {
        let class = ClassSet {
            negated: false,
            ranges: vec![('a', 'z'), ('0', '0')],
        };
        assert!(class.matches('m'));
        assert!(class.matches('0'));
        assert!(!class.matches('A'));
    }

    #[test]
    fn test_class_negated_matches_newline() {
        let class = ClassSet {
            negated: true,
            ranges: vec![('!', '!')],
        };
        assert!(class.matches('\n'));
        assert!(!class.matches('!'));
    }

    #[test]
    fn test_start_anchored() {
        let anchored = Expr::sequence(vec![Expr::StartAnchor, Expr::literal('a')]);
        assert!(anchored.is_start_anchored());

        let either = Expr::alternation(vec![
            Expr::sequence(vec![Expr::StartAnchor, Expr::literal('a')]),
            Expr::literal('b'),
        ]);
        assert!(!either.is_start_anchored());
    }

    #[test]
    fn test_end_anchored() {
        let anchored = Expr::sequence(vec![Expr::literal('a'), Expr::EndAnchor]);
        assert!(anchored.is_end_anchored());
        assert!(!Expr::literal('a').is_end_anchored());
    }
}
