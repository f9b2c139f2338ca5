//! Canonical type tokens and per-dialect type mapping.
//!
//! The mapper is a pure lookup: one canonical token in, a dialect type name
//! (or an unrepresentability signal) out. It never errors — unrecognized
//! tokens fall through to the dialect's untyped marker so a signature can
//! always be rendered.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target presentation dialect for synthesized signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Canonical C-style declarations, tokens passed through untouched.
    #[default]
    Raw,
    Lua,
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "c#")]
    CSharp,
}

impl Dialect {
    /// Lexical-highlighting tag understood by the code viewer.
    pub fn highlight(self) -> &'static str {
        match self {
            Dialect::Raw => "c",
            Dialect::Lua => "lua",
            Dialect::JavaScript => "javascript",
            Dialect::CSharp => "csharp",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "c" => Ok(Dialect::Raw),
            "lua" => Ok(Dialect::Lua),
            "js" | "javascript" => Ok(Dialect::JavaScript),
            "c#" | "cs" | "csharp" => Ok(Dialect::CSharp),
            other => Err(format!(
                "unknown dialect: {}. Use raw, lua, js, or csharp",
                other
            )),
        }
    }
}

/// A canonical type token split into its base name and pointer qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalType<'a> {
    pub base: &'a str,
    pub pointer: bool,
}

impl<'a> CanonicalType<'a> {
    pub fn parse(token: &'a str) -> Self {
        let token = token.trim();
        let base = token.trim_end_matches('*').trim_end();
        CanonicalType {
            base,
            pointer: token.ends_with('*'),
        }
    }

    /// `char*` passes a string by pointer; it is not an out-parameter.
    pub fn is_string(self) -> bool {
        self.pointer && self.base.eq_ignore_ascii_case("char")
    }

    /// Pointer-qualified non-string: the callee writes back through the
    /// reference.
    pub fn is_out_param(self) -> bool {
        self.pointer && !self.is_string()
    }
}

/// Result of mapping a canonical token into a parameter-list position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedType {
    /// Dialect-specific type name.
    Name(String),
    /// No in-list representation in this dialect; the value travels on the
    /// return channel instead (out-parameters in Lua and JavaScript).
    Unrepresentable,
}

/// Map a canonical token for a parameter-list or return position.
pub fn map_type(token: &str, dialect: Dialect) -> MappedType {
    if dialect == Dialect::Raw {
        return MappedType::Name(token.trim().to_string());
    }
    let ty = CanonicalType::parse(token);
    if ty.is_out_param() {
        return match dialect {
            // C# keeps out-parameters in the declaration; the renderer adds
            // the `ref` qualifier to the pointee type mapped here.
            Dialect::CSharp => MappedType::Name(dialect_name(ty, dialect)),
            _ => MappedType::Unrepresentable,
        };
    }
    MappedType::Name(dialect_name(ty, dialect))
}

/// Display form for catalog list rows; `None` when the dialect drops the
/// position from the rendered parameter list.
pub fn display_type(token: &str, dialect: Dialect) -> Option<String> {
    match map_type(token, dialect) {
        MappedType::Name(name) => Some(name),
        MappedType::Unrepresentable => None,
    }
}

/// Dialect name for the value an out-parameter writes back (its pointee).
/// Always yields a name — the pointer qualifier is stripped first.
pub fn out_value_type(token: &str, dialect: Dialect) -> String {
    let ty = CanonicalType::parse(token);
    if dialect == Dialect::Raw {
        return ty.base.to_string();
    }
    dialect_name(ty, dialect)
}

fn dialect_name(ty: CanonicalType, dialect: Dialect) -> String {
    if ty.is_string() {
        return "string".to_string();
    }
    match dialect {
        Dialect::Raw => ty.base.to_string(),
        Dialect::Lua => lua_name(ty.base),
        Dialect::JavaScript => js_name(ty.base),
        Dialect::CSharp => cs_name(ty.base),
    }
}

/// Handle types for in-world objects; every dialect keeps the family,
/// only the casing changes.
const ENTITY_FAMILY: &[&str] = &[
    "Entity", "Ped", "Vehicle", "Object", "Player", "Cam", "Blip", "Pickup", "FireId",
    "Interior", "ScrHandle",
];

fn is_entity(base: &str) -> bool {
    ENTITY_FAMILY.contains(&base)
}

fn lua_name(base: &str) -> String {
    match base {
        "void" => "void".to_string(),
        "int" | "long" | "float" => "number".to_string(),
        "BOOL" | "bool" => "boolean".to_string(),
        "Hash" => "hash".to_string(),
        "Vector3" => "vector3".to_string(),
        _ if is_entity(base) => base.to_lowercase(),
        // `Any` and every unrecognized token: permissive untyped marker.
        _ => "any".to_string(),
    }
}

fn js_name(base: &str) -> String {
    match base {
        "void" => "void".to_string(),
        "int" | "long" | "float" => "number".to_string(),
        "BOOL" | "bool" => "boolean".to_string(),
        "Hash" | "Vector3" => base.to_string(),
        _ if is_entity(base) => base.to_string(),
        _ => "any".to_string(),
    }
}

fn cs_name(base: &str) -> String {
    match base {
        "void" | "int" | "long" | "float" => base.to_string(),
        "BOOL" | "bool" => "bool".to_string(),
        "Hash" => "uint".to_string(),
        "Vector3" => "Vector3".to_string(),
        _ if is_entity(base) => base.to_string(),
        _ => "dynamic".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pointer_qualifier() {
        let ty = CanonicalType::parse("float*");
        assert_eq!(ty.base, "float");
        assert!(ty.pointer);
        assert!(ty.is_out_param());

        let ty = CanonicalType::parse("int");
        assert!(!ty.pointer);
        assert!(!ty.is_out_param());
    }

    #[test]
    fn char_pointer_is_string_not_out_param() {
        let ty = CanonicalType::parse("char*");
        assert!(ty.is_string());
        assert!(!ty.is_out_param());
        assert_eq!(map_type("char*", Dialect::Lua), MappedType::Name("string".into()));
        assert_eq!(map_type("char*", Dialect::CSharp), MappedType::Name("string".into()));
    }

    #[test]
    fn raw_passes_tokens_through() {
        assert_eq!(map_type("float*", Dialect::Raw), MappedType::Name("float*".into()));
        assert_eq!(map_type("Vector3", Dialect::Raw), MappedType::Name("Vector3".into()));
        assert_eq!(
            map_type("SomeUnknownThing", Dialect::Raw),
            MappedType::Name("SomeUnknownThing".into())
        );
    }

    #[test]
    fn lua_table() {
        assert_eq!(map_type("int", Dialect::Lua), MappedType::Name("number".into()));
        assert_eq!(map_type("float", Dialect::Lua), MappedType::Name("number".into()));
        assert_eq!(map_type("BOOL", Dialect::Lua), MappedType::Name("boolean".into()));
        assert_eq!(map_type("Vector3", Dialect::Lua), MappedType::Name("vector3".into()));
        assert_eq!(map_type("Ped", Dialect::Lua), MappedType::Name("ped".into()));
        assert_eq!(map_type("Hash", Dialect::Lua), MappedType::Name("hash".into()));
    }

    #[test]
    fn javascript_table() {
        assert_eq!(map_type("int", Dialect::JavaScript), MappedType::Name("number".into()));
        assert_eq!(map_type("BOOL", Dialect::JavaScript), MappedType::Name("boolean".into()));
        assert_eq!(map_type("Vehicle", Dialect::JavaScript), MappedType::Name("Vehicle".into()));
        assert_eq!(map_type("Vector3", Dialect::JavaScript), MappedType::Name("Vector3".into()));
    }

    #[test]
    fn csharp_table() {
        assert_eq!(map_type("int", Dialect::CSharp), MappedType::Name("int".into()));
        assert_eq!(map_type("BOOL", Dialect::CSharp), MappedType::Name("bool".into()));
        assert_eq!(map_type("Hash", Dialect::CSharp), MappedType::Name("uint".into()));
        assert_eq!(map_type("Any", Dialect::CSharp), MappedType::Name("dynamic".into()));
    }

    #[test]
    fn out_params_unrepresentable_in_script_dialects() {
        assert_eq!(map_type("float*", Dialect::Lua), MappedType::Unrepresentable);
        assert_eq!(map_type("int*", Dialect::JavaScript), MappedType::Unrepresentable);
        assert_eq!(map_type("Vector3*", Dialect::Lua), MappedType::Unrepresentable);
        // C# keeps them — the renderer adds `ref`.
        assert_eq!(map_type("float*", Dialect::CSharp), MappedType::Name("float".into()));
    }

    #[test]
    fn out_value_type_strips_the_pointer() {
        assert_eq!(out_value_type("float*", Dialect::Lua), "number");
        assert_eq!(out_value_type("Vector3*", Dialect::JavaScript), "Vector3");
        assert_eq!(out_value_type("int*", Dialect::Raw), "int");
    }

    #[test]
    fn unknown_tokens_fall_back_to_untyped_marker() {
        assert_eq!(map_type("Sphere", Dialect::Lua), MappedType::Name("any".into()));
        assert_eq!(map_type("Sphere", Dialect::JavaScript), MappedType::Name("any".into()));
        assert_eq!(map_type("Sphere", Dialect::CSharp), MappedType::Name("dynamic".into()));
    }

    #[test]
    fn display_type_drops_out_params() {
        assert_eq!(display_type("float*", Dialect::Lua), None);
        assert_eq!(display_type("float*", Dialect::Raw), Some("float*".into()));
        assert_eq!(display_type("float*", Dialect::CSharp), Some("float".into()));
    }

    #[test]
    fn dialect_from_str() {
        assert_eq!("lua".parse::<Dialect>().unwrap(), Dialect::Lua);
        assert_eq!("js".parse::<Dialect>().unwrap(), Dialect::JavaScript);
        assert_eq!("c#".parse::<Dialect>().unwrap(), Dialect::CSharp);
        assert!("cobol".parse::<Dialect>().is_err());
    }
}
