//! Signature synthesis — trait-based dialect dispatch.
//!
//! One renderer per [`Dialect`] variant behind a common trait; selection is
//! an exhaustive match, never a string comparison. Synthesis is total: it
//! substitutes fallback types for unknown tokens and renders an empty
//! parameter list for parameterless natives rather than failing.

pub mod csharp;
pub mod javascript;
pub mod lua;
pub mod raw;

use crate::model::{Native, Param};
use crate::settings::{DisplaySettings, NamingConvention};
use crate::types::{CanonicalType, Dialect};
use regex::Regex;
use std::sync::LazyLock;

/// Identifiers that are bare hexadecimal hash literals.
pub(crate) static HEX_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9A-Fa-f]+$").unwrap());

/// A synthesized signature plus the lexical-highlighting tag for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub text: String,
    pub highlight: &'static str,
}

/// Trait for synthesizing one native's signature in a specific dialect.
pub trait SignatureRenderer {
    fn render(&self, native: &Native, settings: &DisplaySettings) -> String;
}

/// Renderer for the given dialect.
pub fn renderer(dialect: Dialect) -> Box<dyn SignatureRenderer> {
    match dialect {
        Dialect::Raw => Box::new(raw::RawRenderer),
        Dialect::Lua => Box::new(lua::LuaRenderer),
        Dialect::JavaScript => Box::new(javascript::JsRenderer),
        Dialect::CSharp => Box::new(csharp::CsRenderer),
    }
}

/// Synthesize the signature for `native` under the current settings.
pub fn synthesize(native: &Native, settings: &DisplaySettings) -> Signature {
    Signature {
        text: renderer(settings.dialect).render(native, settings),
        highlight: settings.dialect.highlight(),
    }
}

/// Identifier used in the synthesized signature under the chosen naming
/// convention.
pub fn display_ident(native: &Native, naming: NamingConvention) -> String {
    match naming {
        NamingConvention::Raw => native.ident().to_string(),
        NamingConvention::Alternate => pascal_ident(native.alternate_ident()),
    }
}

/// Capitalized-word identifier: `GET_PLAYER_PED` → `GetPlayerPed`.
///
/// A result still carrying the hex-literal marker (hash-only natives) is
/// rewritten into the fixed `N_0x<HEX>` form, which is a legal identifier
/// in every dialect.
pub fn pascal_ident(raw: &str) -> String {
    let pascal: String = raw.to_lowercase().split('_').map(capitalize).collect();
    match pascal.strip_prefix("0x") {
        Some(hex) => format!("N_0x{}", hex.to_ascii_uppercase()),
        None => pascal,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Split params into call inputs and out-parameters, both keeping the
/// descriptor's positional order.
pub(crate) fn partition_params(native: &Native) -> (Vec<&Param>, Vec<&Param>) {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for param in &native.params {
        if CanonicalType::parse(&param.ty).is_out_param() {
            outputs.push(param);
        } else {
            inputs.push(param);
        }
    }
    (inputs, outputs)
}

pub(crate) fn is_void(return_type: &str) -> bool {
    return_type.trim().eq_ignore_ascii_case("void")
}
