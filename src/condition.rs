//! Condition evaluation.
//!
//! Macro tests are answered from the symbol table. Command conditions go
//! through a [`ShellProbe`], so tests can substitute a recording mock for
//! the real shell.

use crate::directive::Condition;
use crate::symbols::SymbolTable;

/// Capability to ask the host shell whether a command succeeds.
pub trait ShellProbe {
    /// True iff `command` runs and exits with status 0. A command that
    /// cannot be started at all counts as false.
    fn succeeds(&self, command: &str) -> bool;
}

/// Decide a condition against the current symbol table.
pub fn evaluate(condition: &Condition, symbols: &SymbolTable, probe: &dyn ShellProbe) -> bool {
    match condition {
        Condition::Macro { name, negated } => symbols.is_true(name) != *negated,
        Condition::Command(command) => probe.succeeds(command),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ShellProbe;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Probe that answers from a fixed set of succeeding commands and
    /// records every command it was asked about.
    #[derive(Default)]
    pub struct MockProbe {
        succeeding: HashSet<String>,
        calls: RefCell<Vec<String>>,
    }

    impl MockProbe {
        pub fn new(succeeding: &[&str]) -> Self {
            Self {
                succeeding: succeeding.iter().map(|s| s.to_string()).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ShellProbe for MockProbe {
        fn succeeds(&self, command: &str) -> bool {
            self.calls.borrow_mut().push(command.to_string());
            self.succeeding.contains(command)
        }
    }
}
