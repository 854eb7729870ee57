//! Parser for pattern source strings
//!
//! A recursive descent parser that converts pattern source into an
//! [`Expr`] tree. All malformed-pattern errors are reported here, before
//! any program is built.
//!
//! Grammar (in order of precedence, lowest to highest):
//!   pattern    := alternation
//!   alternation := sequence ( '|' sequence )*
//!   sequence   := quantified*
//!   quantified := atom ( '*' | '+' | '?' )*
//!   atom       := literal | '.' | anchor | group | class | escape
//!   anchor     := '^' | '$'
//!   group      := '(' alternation ')'
//!   class      := '[' '^'? class_item+ ']'
//!   class_item := char | char '-' char | '\' char
//!   escape     := '\' char

use crate::ast::{ClassSet, Expr, Quantifier};
use crate::error::CompileError;
use crate::MAX_GROUPS;

/// Parser for pattern source
pub struct Parser {
    /// (byte offset, char) pairs of the source, truncated at the first NUL
    chars: Vec<(usize, char)>,
    /// Cursor into `chars`
    idx: usize,
    /// Capturing groups seen so far
    group_count: u8,
}

impl Parser {
    /// Create a new parser for the given pattern source.
    ///
    /// A NUL byte terminates the source; anything after it is ignored.
    pub fn new(pattern: &str) -> Self {
        let chars = pattern
            .char_indices()
            .take_while(|&(_, c)| c != '\0')
            .collect();
        Parser {
            chars,
            idx: 0,
            group_count: 0,
        }
    }

    /// Parse the entire source and return the AST plus the group count.
    pub fn parse(mut self) -> Result<(Expr, usize), CompileError> {
        let expr = self.parse_alternation()?;

        // The only way to stop before the end is a ')' with no opener.
        if let Some((pos, _)) = self.peek() {
            return Err(CompileError::UnbalancedParen(pos));
        }

        Ok((expr, self.group_count as usize))
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.idx).copied()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let c = self.peek();
        if c.is_some() {
            self.idx += 1;
        }
        c
    }

    /// alternation := sequence ( '|' sequence )*
    fn parse_alternation(&mut self) -> Result<Expr, CompileError> {
        let mut alternatives = vec![self.parse_sequence()?];

        while matches!(self.peek(), Some((_, '|'))) {
            self.advance(); // consume '|'
            alternatives.push(self.parse_sequence()?);
        }

        Ok(Expr::alternation(alternatives))
    }

    /// sequence := quantified*
    fn parse_sequence(&mut self) -> Result<Expr, CompileError> {
        let mut exprs = Vec::new();

        while !matches!(self.peek(), None | Some((_, '|')) | Some((_, ')'))) {
            exprs.push(self.parse_quantified()?);
        }

        Ok(Expr::sequence(exprs))
    }

    /// quantified := atom ( '*' | '+' | '?' )*
    fn parse_quantified(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.parse_atom()?;

        while let Some((_, c @ ('*' | '+' | '?'))) = self.peek() {
            self.advance();
            let quantifier = match c {
                '*' => Quantifier::ZeroOrMore,
                '+' => Quantifier::OneOrMore,
                _ => Quantifier::Optional,
            };
            expr = Expr::quantified(expr, quantifier);
        }

        Ok(expr)
    }

    /// atom := literal | '.' | anchor | group | class | escape
    fn parse_atom(&mut self) -> Result<Expr, CompileError> {
        let (pos, c) = self.advance().expect("sequence loop guarantees a char");

        match c {
            '*' | '+' | '?' => Err(CompileError::DanglingQuantifier { ch: c, pos }),
            '.' => Ok(Expr::Any),
            '^' => Ok(Expr::StartAnchor),
            '$' => Ok(Expr::EndAnchor),
            '(' => self.parse_group(pos),
            '[' => self.parse_class(pos),
            '\\' => match self.advance() {
                Some((_, escaped)) => Ok(Expr::literal(escaped)),
                None => Err(CompileError::TrailingEscape),
            },
            _ => Ok(Expr::literal(c)),
        }
    }

    /// group := '(' alternation ')'
    ///
    /// `open` is the position of the already-consumed '('. Group numbers
    /// are assigned here, by source order of the opening parenthesis.
    fn parse_group(&mut self, open: usize) -> Result<Expr, CompileError> {
        if self.group_count as usize >= MAX_GROUPS - 1 {
            return Err(CompileError::TooManyGroups);
        }
        self.group_count += 1;
        let index = self.group_count;

        let inner = self.parse_alternation()?;

        match self.advance() {
            Some((_, ')')) => Ok(Expr::group(index, inner)),
            _ => Err(CompileError::UnbalancedParen(open)),
        }
    }

    /// class := '[' '^'? class_item+ ']'
    ///
    /// `open` is the position of the already-consumed '['. Inside a class
    /// only `]`, `-`, and `\` are special; `-` at the end is a literal.
    fn parse_class(&mut self, open: usize) -> Result<Expr, CompileError> {
        let negated = if matches!(self.peek(), Some((_, '^'))) {
            self.advance();
            true
        } else {
            false
        };

        let mut ranges = Vec::new();

        loop {
            match self.peek() {
                None => return Err(CompileError::UnclosedClass(open)),
                Some((_, ']')) => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    let (pos, start) = self.parse_class_char()?;

                    // Range, unless the '-' is the last class member.
                    if matches!(self.peek(), Some((_, '-')))
                        && !matches!(self.chars.get(self.idx + 1), None | Some((_, ']')))
                    {
                        self.advance(); // consume '-'
                        let (_, end) = self.parse_class_char()?;
                        if end < start {
                            return Err(CompileError::InvalidClassRange { start, end, pos });
                        }
                        ranges.push((start, end));
                    } else {
                        ranges.push((start, start));
                    }
                }
            }
        }

        if ranges.is_empty() {
            return Err(CompileError::EmptyClass(open));
        }

        Ok(Expr::Class(ClassSet { negated, ranges }))
    }

    /// A single class member character, honoring `\` escapes.
    fn parse_class_char(&mut self) -> Result<(usize, char), CompileError> {
        let (pos, c) = self.advance().expect("caller checked peek");
        if c == '\\' {
            match self.advance() {
                Some((_, escaped)) => Ok((pos, escaped)),
                None => Err(CompileError::TrailingEscape),
            }
        } else {
            Ok((pos, c))
        }
    }
}

/// Parse a pattern source string into an AST and its capturing-group count.
pub fn parse(pattern: &str) -> Result<(Expr, usize), CompileError> {
    Parser::new(pattern).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        let (expr, ngroups) = parse("abc").unwrap();
        assert_eq!(
            expr,
            Expr::sequence(vec![
                Expr::literal('a'),
                Expr::literal('b'),
                Expr::literal('c')
            ])
        );
        assert_eq!(ngroups, 0);
    }

    #[test]
    fn test_parse_empty() {
        let (expr, _) = parse("").unwrap();
        assert_eq!(expr, Expr::Empty);
    }

    #[test]
    fn test_parse_alternation() {
        let (expr, _) = parse("a|b|c").unwrap();
        assert!(matches!(expr, Expr::Alternation(ref alts) if alts.len() == 3));
    }

    #[test]
    fn test_parse_quantifiers() {
        let (expr, _) = parse("a*").unwrap();
        assert!(matches!(
            expr,
            Expr::Quantified {
                quantifier: Quantifier::ZeroOrMore,
                ..
            }
        ));

        let (expr, _) = parse("a+").unwrap();
        assert!(matches!(
            expr,
            Expr::Quantified {
                quantifier: Quantifier::OneOrMore,
                ..
            }
        ));

        let (expr, _) = parse("a?").unwrap();
        assert!(matches!(
            expr,
            Expr::Quantified {
                quantifier: Quantifier::Optional,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_stacked_quantifiers() {
        // a*? composes: (a*)?
        let (expr, _) = parse("a*?").unwrap();
        assert!(matches!(
            expr,
            Expr::Quantified {
                quantifier: Quantifier::Optional,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_groups_numbered_by_source_order() {
        let (expr, ngroups) = parse("(a(b))(c)").unwrap();
        assert_eq!(ngroups, 3);

        let Expr::Sequence(items) = expr else {
            panic!("expected sequence");
        };
        assert!(matches!(items[0], Expr::Group { index: 1, .. }));
        assert!(matches!(items[1], Expr::Group { index: 3, .. }));
    }

    #[test]
    fn test_parse_class() {
        let (expr, _) = parse("[a-z0]").unwrap();
        assert_eq!(
            expr,
            Expr::Class(ClassSet {
                negated: false,
                ranges: vec![('a', 'z'), ('0', '0')],
            })
        );
    }

    #[test]
    fn test_parse_class_negated() {
        let (expr, _) = parse("[^!@]").unwrap();
        assert_eq!(
            expr,
            Expr::Class(ClassSet {
                negated: true,
                ranges: vec![('!', '!'), ('@', '@')],
            })
        );
    }

    #[test]
    fn test_parse_class_trailing_dash_is_literal() {
        let (expr, _) = parse("[a-]").unwrap();
        assert_eq!(
            expr,
            Expr::Class(ClassSet {
                negated: false,
                ranges: vec![('a', 'a'), ('-', '-')],
            })
        );
    }

    #[test]
    fn test_parse_escape() {
        let (expr, _) = parse(r"\.").unwrap();
        assert_eq!(expr, Expr::literal('.'));

        let (expr, _) = parse(r"uk\.ac").unwrap();
        let Expr::Sequence(items) = expr else {
            panic!("expected sequence");
        };
        assert_eq!(items[2], Expr::literal('.'));
    }

    #[test]
    fn test_parse_anchors() {
        let (expr, _) = parse("^a$").unwrap();
        assert_eq!(
            expr,
            Expr::sequence(vec![Expr::StartAnchor, Expr::literal('a'), Expr::EndAnchor])
        );
    }

    #[test]
    fn test_error_unbalanced_open() {
        assert!(matches!(
            parse("(ab"),
            Err(CompileError::UnbalancedParen(0))
        ));
    }

    #[test]
    fn test_error_unbalanced_close() {
        assert!(matches!(
            parse("ab)"),
            Err(CompileError::UnbalancedParen(2))
        ));
    }

    #[test]
    fn test_error_unclosed_class() {
        assert!(matches!(parse("[abc"), Err(CompileError::UnclosedClass(0))));
    }

    #[test]
    fn test_error_empty_class() {
        assert!(matches!(parse("[]"), Err(CompileError::EmptyClass(0))));
        assert!(matches!(parse("[^]"), Err(CompileError::EmptyClass(0))));
    }

    #[test]
    fn test_error_inverted_range() {
        assert!(matches!(
            parse("[z-a]"),
            Err(CompileError::InvalidClassRange {
                start: 'z',
                end: 'a',
                ..
            })
        ));
    }

    #[test]
    fn test_error_dangling_quantifier() {
        assert!(matches!(
            parse("*a"),
            Err(CompileError::DanglingQuantifier { ch: '*', pos: 0 })
        ));
        assert!(matches!(
            parse("a|+b"),
            Err(CompileError::DanglingQuantifier { ch: '+', pos: 2 })
        ));
    }

    #[test]
    fn test_error_trailing_escape() {
        assert!(matches!(parse(r"ab\"), Err(CompileError::TrailingEscape)));
    }

    #[test]
    fn test_error_too_many_groups() {
        let pattern = "(a)".repeat(10);
        assert!(matches!(parse(&pattern), Err(CompileError::TooManyGroups)));
        let pattern = "(a)".repeat(9);
        assert!(parse(&pattern).is_ok());
    }

    #[test]
    fn test_nul_terminates_pattern() {
        let (expr, _) = parse("ab\0cd").unwrap();
        assert_eq!(
            expr,
            Expr::sequence(vec![Expr::literal('a'), Expr::literal('b')])
        );
    }
}
