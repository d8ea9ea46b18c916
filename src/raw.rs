//! Raw-section normalization.
//!
//! Rewrites a `#%raw` ... `#%endraw` block into raw shell literals so later
//! phases never need to know raw sections exist:
//!
//! ```text
//! #%raw              (dropped)
//! if true; then  ->  $$ if true; then
//! fi             ->  $$ fi
//! #%endraw       ->  $$
//! ```

use regex::Regex;
use std::sync::LazyLock;

static RE_RAW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#%\s*raw[#\s]*$").unwrap());
static RE_ENDRAW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#%\s*endraw[#\s]*$").unwrap());

/// Prefix for lines inside a raw section.
pub const RAW_PREFIX: &str = "$$ ";
/// Line emitted in place of `#%endraw`.
pub const RAW_END: &str = "$$";

pub fn normalize_raw_sections(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_raw = false;

    for line in lines {
        if in_raw {
            if RE_ENDRAW.is_match(line) {
                out.push(RAW_END.to_string());
                in_raw = false;
            } else {
                out.push(format!("{RAW_PREFIX}{line}"));
            }
            continue;
        }
        if RE_RAW.is_match(line) {
            in_raw = true;
            continue;
        }
        out.push(line.clone());
    }

    // An unterminated section is closed at end of document
    if in_raw {
        tracing::warn!("#%raw section without #%endraw; closing it at end of document");
        out.push(RAW_END.to_string());
    }
    out
}
