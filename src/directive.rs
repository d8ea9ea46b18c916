//! Preprocessor directive parsing.
//!
//! | Directive | Syntax |
//! |-----------|--------|
//! | If / Elif | `#%if <cond>` / `#%elif <cond>` (optional `; then`, trailing `# comment`) |
//! | Else | `#%else` |
//! | EndIf | `#%fi` or `#%endif` |
//! | Define | `#%define [%]name [value]` |
//! | Undef | `#%undef [%]name` or `#%undefine [%]name` |
//!
//! A condition is either a macro test (`%name`, `%{name}`, `!%name`) or a
//! shell command whose exit status decides the branch.

use regex::Regex;
use std::sync::LazyLock;

static RE_IF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#%\s*(el)?if\s+(.*)$").unwrap());
static RE_ELSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#%\s*else\s*(?:#.*)?$").unwrap());
static RE_ENDIF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#%\s*(?:fi|endif)\s*(?:#.*)?$").unwrap());
static RE_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#%\s*define\s+%?([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*))?$").unwrap()
});
static RE_UNDEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#%\s*undef(?:ine)?\s+%?([A-Za-z_][A-Za-z0-9_]*)\s*(?:#.*)?$").unwrap()
});
static RE_TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+#.*$").unwrap());
static RE_THEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*;\s*then\s*$").unwrap());
static RE_MACRO_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(!?)\s*%(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `%name` (or `!%name` when negated).
    Macro { name: String, negated: bool },
    /// Anything else: run through the shell, exit status 0 is true.
    Command(String),
}

impl Condition {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match RE_MACRO_TEST.captures(text) {
            Some(cap) => {
                let name = cap.get(2).or_else(|| cap.get(3)).map_or("", |m| m.as_str());
                Condition::Macro {
                    name: name.to_string(),
                    negated: &cap[1] == "!",
                }
            }
            None => Condition::Command(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    If(Condition),
    Elif(Condition),
    Else,
    EndIf,
    Define { name: String, value: String },
    Undef { name: String },
}

impl Directive {
    /// Parse a line as a directive; `None` for every other line.
    pub fn parse(line: &str) -> Option<Self> {
        if !line.starts_with("#%") {
            return None;
        }
        if let Some(cap) = RE_IF.captures(line) {
            let condition = Condition::parse(&clean_condition(&cap[2]));
            return Some(if cap.get(1).is_some() {
                Directive::Elif(condition)
            } else {
                Directive::If(condition)
            });
        }
        if RE_ELSE.is_match(line) {
            return Some(Directive::Else);
        }
        if RE_ENDIF.is_match(line) {
            return Some(Directive::EndIf);
        }
        if let Some(cap) = RE_DEFINE.captures(line) {
            let value = cap
                .get(2)
                .map(|m| RE_TRAILING_COMMENT.replace(m.as_str(), "").trim().to_string())
                .filter(|v| !v.is_empty() && !v.starts_with('#'))
                .unwrap_or_else(|| crate::symbols::DEFAULT_VALUE.to_string());
            return Some(Directive::Define {
                name: cap[1].to_string(),
                value,
            });
        }
        if let Some(cap) = RE_UNDEF.captures(line) {
            return Some(Directive::Undef {
                name: cap[1].to_string(),
            });
        }
        None
    }
}

/// Strip a trailing `# comment` and an optional `; then` from condition text.
fn clean_condition(raw: &str) -> String {
    let text = RE_TRAILING_COMMENT.replace(raw, "");
    RE_THEN.replace(&text, "").trim().to_string()
}
