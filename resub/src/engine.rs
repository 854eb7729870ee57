//! Pattern matching engine
//!
//! Executes a compiled [`Program`] against a subject string. The matcher
//! is a backtracking VM: it keeps an explicit stack of pending threads
//! (one per untaken `Split` alternate) and accepts the first thread to
//! reach `Match`. Together with the compiler's branch ordering this gives
//! leftmost-first semantics: alternatives and quantifier continuations are
//! explored in source order, greedy arms first, and the first successful
//! path wins (`a|ab` on `"ab"` matches `"a"`).
//!
//! A visited set over (instruction, position) pairs prunes re-exploration.
//! Whether a state can reach `Match` does not depend on capture slots, so
//! pruning never changes the accepted path; it only bounds pathological
//! patterns to one visit per state per scan position.

use crate::error::CompileError;
use crate::parser;
use crate::prog::{Inst, Program};
use crate::MAX_GROUPS;
use std::collections::HashSet;

/// One capture slot pair per group: 2n = start, 2n + 1 = end.
type Slots = [Option<usize>; MAX_GROUPS * 2];

/// Captured spans from one successful match attempt
///
/// Index 0 is the whole match; 1-9 are capturing groups. Spans are byte
/// offsets into the subject and always fall on char boundaries. A group
/// that did not participate in the accepted path reports `None`. When a
/// group sits inside a repeated quantifier, the span recorded is the one
/// from the last iteration taken on the accepted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    slots: Slots,
    ngroups: usize,
}

impl Captures {
    /// The `(start, end)` byte span of group `i`, if it participated.
    pub fn get(&self, i: usize) -> Option<(usize, usize)> {
        if i >= MAX_GROUPS {
            return None;
        }
        match (self.slots[2 * i], self.slots[2 * i + 1]) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// The text of group `i` within `subject`.
    ///
    /// `subject` must be the string the match ran against.
    pub fn group_str<'s>(&self, subject: &'s str, i: usize) -> Option<&'s str> {
        self.get(i).map(|(start, end)| &subject[start..end])
    }

    /// The span of the whole match. Group 0 is always set.
    pub fn span(&self) -> (usize, usize) {
        self.get(0).expect("group 0 is set on every match")
    }

    /// Whether group `i` participated in the match.
    pub fn matched(&self, i: usize) -> bool {
        self.get(i).is_some()
    }

    /// How many capturing groups the pattern declared (excluding group 0).
    pub fn group_count(&self) -> usize {
        self.ngroups
    }
}

/// A compiled pattern, ready to execute against subjects
///
/// Compile once, exec many: the program is immutable and execution is
/// side-effect free.
#[derive(Debug, Clone)]
pub struct Regex {
    prog: Program,
    pattern: String,
}

impl Regex {
    /// Compile a pattern.
    ///
    /// Either a complete valid program is produced or a [`CompileError`]
    /// is returned; there is no partially compiled state.
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        let (expr, ngroups) = parser::parse(pattern)?;
        let prog = Program::compile(&expr, ngroups);
        Ok(Regex {
            prog,
            pattern: pattern.to_owned(),
        })
    }

    /// The pattern source this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The compiled program.
    pub fn program(&self) -> &Program {
        &self.prog
    }

    /// Number of capturing groups the pattern declared.
    pub fn group_count(&self) -> usize {
        self.prog.group_count()
    }

    /// Whether the pattern matches anywhere in the subject.
    pub fn is_match(&self, subject: &str) -> bool {
        self.exec(subject).is_some()
    }

    /// Run the program against a subject.
    ///
    /// Attempts a match at each char boundary from 0 upward (position 0
    /// only when start-anchored) and returns the first success. `None`
    /// means no match: a normal outcome, not an error. A NUL byte
    /// terminates the subject.
    pub fn exec(&self, subject: &str) -> Option<Captures> {
        let subject = match subject.find('\0') {
            Some(nul) => &subject[..nul],
            None => subject,
        };

        // Char-indexed view; offs has one extra entry for the end position.
        let mut chars = Vec::with_capacity(subject.len());
        let mut offs = Vec::with_capacity(subject.len() + 1);
        for (off, c) in subject.char_indices() {
            offs.push(off);
            chars.push(c);
        }
        offs.push(subject.len());

        for start in 0..=chars.len() {
            if let Some(slots) = self.run(&chars, &offs, start) {
                return Some(Captures {
                    slots,
                    ngroups: self.prog.group_count(),
                });
            }
            if self.prog.anchored_start() {
                break;
            }
        }
        None
    }

    /// One match attempt starting at char index `start`.
    fn run(&self, chars: &[char], offs: &[usize], start: usize) -> Option<Slots> {
        let insts = self.prog.insts();
        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let mut stack: Vec<Thread> = vec![Thread {
            pc: 0,
            sp: start,
            slots: [None; MAX_GROUPS * 2],
        }];

        while let Some(thread) = stack.pop() {
            let Thread {
                mut pc,
                mut sp,
                mut slots,
            } = thread;

            loop {
                if !visited.insert((pc, sp)) {
                    break; // already explored from here, dead end
                }
                match &insts[pc] {
                    Inst::Char(c) => {
                        if sp < chars.len() && chars[sp] == *c {
                            sp += 1;
                            pc += 1;
                        } else {
                            break;
                        }
                    }
                    Inst::Any => {
                        if sp < chars.len() && chars[sp] != '\n' {
                            sp += 1;
                            pc += 1;
                        } else {
                            break;
                        }
                    }
                    Inst::Class(set) => {
                        if sp < chars.len() && set.matches(chars[sp]) {
                            sp += 1;
                            pc += 1;
                        } else {
                            break;
                        }
                    }
                    Inst::Split(pref, alt) => {
                        stack.push(Thread {
                            pc: *alt,
                            sp,
                            slots,
                        });
                        pc = *pref;
                    }
                    Inst::Jmp(target) => pc = *target,
                    Inst::Save(slot) => {
                        slots[*slot] = Some(offs[sp]);
                        pc += 1;
                    }
                    Inst::AssertStart => {
                        if offs[sp] == 0 {
                            pc += 1;
                        } else {
                            break;
                        }
                    }
                    Inst::AssertEnd => {
                        if sp == chars.len() {
                            pc += 1;
                        } else {
                            break;
                        }
                    }
                    Inst::Match => return Some(slots),
                }
            }
        }
        None
    }
}

/// A pending exploration state
#[derive(Clone, Copy)]
struct Thread {
    pc: usize,
    sp: usize,
    slots: Slots,
}
