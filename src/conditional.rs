//! Conditional and macro evaluation.
//!
//! A single forward scan over the document. Each open `#%if` region is one
//! entry on a stack of [`RegionState`]s:
//!
//! | State | `elif c` | `else` | `fi` |
//! |-------|----------|--------|------|
//! | `AwaitingMatch` | `BranchActive` if `c`, else stay | `BranchActive` | pop |
//! | `BranchActive` | `BranchExhausted` | `BranchExhausted` | pop |
//! | `BranchExhausted` | stay | stay | pop |
//!
//! `#%if c` pushes `BranchActive` or `AwaitingMatch` depending on `c`, or
//! `BranchExhausted` when the enclosing region is not emitting (its
//! condition is never evaluated). Ordinary lines are kept, and `define` /
//! `undef` applied, only while every open region is `BranchActive`.
//! Directive lines themselves are consumed.

use crate::condition::{self, ShellProbe};
use crate::directive::{Condition, Directive};
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    NoRegion,
    AwaitingMatch,
    BranchActive,
    BranchExhausted,
}

pub struct Evaluator<'p> {
    symbols: SymbolTable,
    regions: Vec<RegionState>,
    probe: &'p dyn ShellProbe,
}

impl<'p> Evaluator<'p> {
    pub fn new(symbols: SymbolTable, probe: &'p dyn ShellProbe) -> Self {
        Self {
            symbols,
            regions: Vec::new(),
            probe,
        }
    }

    /// State of the innermost open region.
    pub fn state(&self) -> RegionState {
        self.regions.last().copied().unwrap_or(RegionState::NoRegion)
    }

    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    fn is_emitting(&self) -> bool {
        self.regions.iter().all(|r| *r == RegionState::BranchActive)
    }

    fn test(&self, condition: &Condition) -> bool {
        let result = condition::evaluate(condition, &self.symbols, self.probe);
        tracing::trace!(?condition, result, "condition evaluated");
        result
    }

    /// Feed one line; returns it back if it survives.
    pub fn feed<'l>(&mut self, line: &'l str) -> Option<&'l str> {
        let Some(directive) = Directive::parse(line) else {
            return self.is_emitting().then_some(line);
        };

        match directive {
            Directive::If(condition) => {
                let state = if !self.is_emitting() {
                    RegionState::BranchExhausted
                } else if self.test(&condition) {
                    RegionState::BranchActive
                } else {
                    RegionState::AwaitingMatch
                };
                self.regions.push(state);
            }
            Directive::Elif(condition) => match self.regions.last().copied() {
                Some(RegionState::AwaitingMatch) => {
                    if self.test(&condition) {
                        self.set_top(RegionState::BranchActive);
                    }
                }
                Some(RegionState::BranchActive) => self.set_top(RegionState::BranchExhausted),
                Some(_) => {}
                None => tracing::warn!("#%elif outside of a conditional region: {line}"),
            },
            Directive::Else => match self.regions.last().copied() {
                Some(RegionState::AwaitingMatch) => self.set_top(RegionState::BranchActive),
                Some(RegionState::BranchActive) => self.set_top(RegionState::BranchExhausted),
                Some(_) => {}
                None => tracing::warn!("#%else outside of a conditional region"),
            },
            Directive::EndIf => {
                if self.regions.pop().is_none() {
                    tracing::warn!("#%fi outside of a conditional region");
                }
            }
            Directive::Define { name, value } => {
                if self.is_emitting() {
                    tracing::debug!(%name, %value, "macro defined");
                    self.symbols.define(&name, &value);
                }
            }
            Directive::Undef { name } => {
                if self.is_emitting() {
                    tracing::debug!(%name, "macro undefined");
                    self.symbols.undefine(&name);
                }
            }
        }
        None
    }

    fn set_top(&mut self, state: RegionState) {
        if let Some(top) = self.regions.last_mut() {
            *top = state;
        }
    }

    /// Finish the pass, warning about regions left open.
    pub fn finish(self) {
        if self.state() != RegionState::NoRegion {
            tracing::warn!(
                open = self.depth(),
                "conditional region not closed by end of document"
            );
        }
    }
}

/// Run the conditional pass over a whole document. The symbol table is
/// consumed; definitions made here are not visible to later phases.
pub fn evaluate_lines(lines: &[String], symbols: SymbolTable, probe: &dyn ShellProbe) -> Vec<String> {
    let mut evaluator = Evaluator::new(symbols, probe);
    let out = lines
        .iter()
        .filter_map(|line| evaluator.feed(line).map(str::to_string))
        .collect();
    evaluator.finish();
    out
}
