//! C# dialect — managed declaration with by-reference out-parameters.
//!
//! No input/output partition here: pointer-qualified non-string parameters
//! stay in place with an explicit `ref` qualifier, and the return type is
//! the mapped return type directly.

use crate::model::Native;
use crate::render::{display_ident, SignatureRenderer};
use crate::settings::DisplaySettings;
use crate::types::{map_type, CanonicalType, Dialect, MappedType};

pub struct CsRenderer;

impl SignatureRenderer for CsRenderer {
    fn render(&self, native: &Native, settings: &DisplaySettings) -> String {
        let params: Vec<String> = native
            .params
            .iter()
            .map(|p| {
                let ty = cs_type(&p.ty);
                if CanonicalType::parse(&p.ty).is_out_param() {
                    format!("ref {} {}", ty, p.name)
                } else {
                    format!("{} {}", ty, p.name)
                }
            })
            .collect();

        format!(
            "// {}\n{} {}({});",
            native.ident(),
            cs_type(&native.return_type),
            display_ident(native, settings.naming),
            params.join(", ")
        )
    }
}

/// C# never signals unrepresentability — pointees map to their value type.
fn cs_type(token: &str) -> String {
    match map_type(token, Dialect::CSharp) {
        MappedType::Name(name) => name,
        MappedType::Unrepresentable => "dynamic".to_string(),
    }
}
