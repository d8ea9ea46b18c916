//! Macro symbol table.
//!
//! Owned by a single conditional-evaluation pass. Names start with a letter
//! or underscore; a macro defined without a value holds `"1"`, and a macro
//! whose value is `"0"` counts as false.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Value given to a macro defined without one.
pub const DEFAULT_VALUE: &str = "1";
/// Name of the macro predefined from the display environment.
pub const GUI_MACRO: &str = "GUI";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    macros: BTreeMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding only the predefined `GUI` macro.
    pub fn predefined(gui: bool) -> Self {
        let mut table = Self::new();
        table.define(GUI_MACRO, if gui { "1" } else { "0" });
        table
    }

    pub fn define(&mut self, name: &str, value: &str) {
        self.macros.insert(name.to_string(), value.to_string());
    }

    pub fn undefine(&mut self, name: &str) {
        self.macros.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.macros.get(name).map(String::as_str)
    }

    /// True iff `name` is defined with a value other than `"0"`.
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| v != "0")
    }
}

pub fn is_valid_name(name: &str) -> bool {
    RE_NAME.is_match(name)
}

/// Parse a `NAME[=VALUE]` command-line definition.
pub fn parse_definition(arg: &str) -> Result<(String, String), String> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) => (name, value),
        None => (arg, DEFAULT_VALUE),
    };
    let name = name.strip_prefix('%').unwrap_or(name);
    if !is_valid_name(name) {
        return Err(format!("invalid macro name '{name}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a bare macro name given on the command line.
pub fn parse_name(arg: &str) -> Result<String, String> {
    let name = arg.strip_prefix('%').unwrap_or(arg);
    if !is_valid_name(name) {
        return Err(format!("invalid macro name '{name}'"));
    }
    Ok(name.to_string())
}
