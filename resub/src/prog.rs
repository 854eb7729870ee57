//! Compiled pattern programs
//!
//! Lowers the AST into a compact instruction sequence executed by the
//! matcher in [`crate::engine`]. The construction is Thompson-style: each
//! expression compiles to a run of instructions with a single entry point,
//! and control structure is expressed with split/jump instructions.
//!
//! Greedy quantifiers put the consuming branch first in their `Split`, so
//! a matcher that explores the preferred branch before the alternate gets
//! "try consuming first, fall back on failure" semantics.

use crate::ast::{ClassSet, Expr, Quantifier};

/// One instruction of a compiled program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// Consume one specific character
    Char(char),
    /// Consume any character except newline
    Any,
    /// Consume one character accepted by the class
    Class(ClassSet),
    /// Fork: explore `.0` first, fall back to `.1`
    Split(usize, usize),
    /// Unconditional jump
    Jmp(usize),
    /// Record the current byte offset in capture slot `.0`
    ///
    /// Slot `2n` is the start of group `n`, slot `2n + 1` its end.
    Save(usize),
    /// Zero-width assert: at subject start
    AssertStart,
    /// Zero-width assert: at subject end
    AssertEnd,
    /// Accept
    Match,
}

/// A compiled, immutable pattern program
///
/// Produced only from a syntactically valid pattern; executing it has no
/// side effects, so one program may be shared across threads.
#[derive(Debug, Clone)]
pub struct Program {
    insts: Vec<Inst>,
    ngroups: usize,
    anchored_start: bool,
    anchored_end: bool,
}

impl Program {
    /// Compile an AST into a program.
    ///
    /// `ngroups` is the capturing-group count the parser assigned.
    pub fn compile(expr: &Expr, ngroups: usize) -> Self {
        let mut c = Compiler { insts: Vec::new() };
        c.push(Inst::Save(0));
        c.compile_expr(expr);
        c.push(Inst::Save(1));
        c.push(Inst::Match);

        Program {
            insts: c.insts,
            ngroups,
            anchored_start: expr.is_start_anchored(),
            anchored_end: expr.is_end_anchored(),
        }
    }

    /// The instruction sequence.
    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    /// Number of capturing groups (0-9), excluding the whole match.
    pub fn group_count(&self) -> usize {
        self.ngroups
    }

    /// Whether every match must begin at subject start.
    pub fn anchored_start(&self) -> bool {
        self.anchored_start
    }

    /// Whether every match must end at subject end.
    pub fn anchored_end(&self) -> bool {
        self.anchored_end
    }
}

/// Instruction emitter
struct Compiler {
    insts: Vec<Inst>,
}

impl Compiler {
    fn push(&mut self, inst: Inst) -> usize {
        self.insts.push(inst);
        self.insts.len() - 1
    }

    fn here(&self) -> usize {
        self.insts.len()
    }

    fn compile_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Empty => {}
            Expr::Literal(c) => {
                self.push(Inst::Char(*c));
            }
            Expr::Any => {
                self.push(Inst::Any);
            }
            Expr::Class(set) => {
                self.push(Inst::Class(set.clone()));
            }
            Expr::Sequence(exprs) => {
                for e in exprs {
                    self.compile_expr(e);
                }
            }
            Expr::Alternation(exprs) => self.compile_alternation(exprs),
            Expr::Quantified { expr, quantifier } => self.compile_quantified(expr, *quantifier),
            Expr::Group { index, expr } => {
                let slot = 2 * (*index as usize);
                self.push(Inst::Save(slot));
                self.compile_expr(expr);
                self.push(Inst::Save(slot + 1));
            }
            Expr::StartAnchor => {
                self.push(Inst::AssertStart);
            }
            Expr::EndAnchor => {
                self.push(Inst::AssertEnd);
            }
        }
    }

    /// Alternation compiles to a chain of splits whose preferred arm is the
    /// branch body, giving leftmost-first branch exploration.
    fn compile_alternation(&mut self, exprs: &[Expr]) {
        let mut exits = Vec::new();

        for (i, e) in exprs.iter().enumerate() {
            let last = i == exprs.len() - 1;
            if last {
                self.compile_expr(e);
            } else {
                let split = self.push(Inst::Split(0, 0));
                self.compile_expr(e);
                exits.push(self.push(Inst::Jmp(0)));
                let next = self.here();
                self.insts[split] = Inst::Split(split + 1, next);
            }
        }

        let end = self.here();
        for exit in exits {
            self.insts[exit] = Inst::Jmp(end);
        }
    }

    fn compile_quantified(&mut self, expr: &Expr, quantifier: Quantifier) {
        match quantifier {
            Quantifier::ZeroOrMore => {
                // L: split body, out / body / jmp L / out:
                let split = self.push(Inst::Split(0, 0));
                self.compile_expr(expr);
                self.push(Inst::Jmp(split));
                let out = self.here();
                self.insts[split] = Inst::Split(split + 1, out);
            }
            Quantifier::OneOrMore => {
                // L: body / split L, out
                let body = self.here();
                self.compile_expr(expr);
                let split = self.push(Inst::Split(0, 0));
                self.insts[split] = Inst::Split(body, split + 1);
            }
            Quantifier::Optional => {
                // split body, out / body / out:
                let split = self.push(Inst::Split(0, 0));
                self.compile_expr(expr);
                let out = self.here();
                self.insts[split] = Inst::Split(split + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn compile(pattern: &str) -> Program {
        let (expr, ngroups) = parse(pattern).unwrap();
        Program::compile(&expr, ngroups)
    }

    #[test]
    fn test_literal_program_shape() {
        let prog = compile("ab");
        assert_eq!(
            prog.insts(),
            &[
                Inst::Save(0),
                Inst::Char('a'),
                Inst::Char('b'),
                Inst::Save(1),
                Inst::Match,
            ]
        );
    }

    #[test]
    fn test_star_prefers_consuming() {
        let prog = compile("a*");
        // Split's preferred arm is the body, not the exit.
        let Inst::Split(pref, alt) = prog.insts()[1] else {
            panic!("expected split after Save(0)");
        };
        assert_eq!(prog.insts()[pref], Inst::Char('a'));
        assert!(alt > pref);
    }

    #[test]
    fn test_plus_loops_back() {
        let prog = compile("a+");
        let Inst::Split(pref, alt) = prog.insts()[2] else {
            panic!("expected split after body");
        };
        assert_eq!(prog.insts()[pref], Inst::Char('a'));
        assert_eq!(alt, 3);
    }

    #[test]
    fn test_alternation_prefers_first_branch() {
        let prog = compile("a|b");
        let Inst::Split(pref, alt) = prog.insts()[1] else {
            panic!("expected split");
        };
        assert_eq!(prog.insts()[pref], Inst::Char('a'));
        assert_eq!(prog.insts()[alt], Inst::Char('b'));
    }

    #[test]
    fn test_group_saves_slots() {
        let prog = compile("(a)");
        assert_eq!(
            prog.insts(),
            &[
                Inst::Save(0),
                Inst::Save(2),
                Inst::Char('a'),
                Inst::Save(3),
                Inst::Save(1),
                Inst::Match,
            ]
        );
        assert_eq!(prog.group_count(), 1);
    }

    #[test]
    fn test_anchor_flags() {
        let prog = compile("^abc$");
        assert!(prog.anchored_start());
        assert!(prog.anchored_end());

        let prog = compile("abc");
        assert!(!prog.anchored_start());
        assert!(!prog.anchored_end());

        // Only one branch anchored: flag must stay conservative.
        let prog = compile("^a|b");
        assert!(!prog.anchored_start());
    }

    #[test]
    fn test_compile_deterministic() {
        let a = compile("^([^!]+)@([^!@]+)$");
        let b = compile("^([^!]+)@([^!@]+)$");
        assert_eq!(a.insts(), b.insts());
        assert_eq!(a.group_count(), b.group_count());
    }
}
