//! Raw dialect — C-style declaration with canonical tokens untouched.
//!
//! Out-parameters stay in the list as ordinary pointer parameters; the raw
//! dialect has no by-reference sugar to hide them behind.

use crate::model::Native;
use crate::render::{display_ident, pascal_ident, SignatureRenderer, HEX_IDENT};
use crate::settings::DisplaySettings;

pub struct RawRenderer;

impl SignatureRenderer for RawRenderer {
    fn render(&self, native: &Native, settings: &DisplaySettings) -> String {
        let params: Vec<String> = native
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect();

        // Hash-only identifiers go into the header comment verbatim; named
        // natives get their script-style name there.
        let header = if HEX_IDENT.is_match(native.ident()) {
            native.hash.clone()
        } else {
            pascal_ident(native.ident())
        };

        format!(
            "// {}\n{} {} ({})",
            header,
            native.return_type,
            display_ident(native, settings.naming),
            params.join(", ")
        )
    }
}
