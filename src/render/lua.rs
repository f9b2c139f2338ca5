//! Lua dialect — script-style call with inline `--[[ type ]]` annotations.
//!
//! Out-parameters leave the argument list and come back on the return
//! channel: the call binds a `local` tuple of the mapped return value (when
//! non-void) followed by each out value, in descriptor order.

use crate::model::Native;
use crate::render::{display_ident, is_void, partition_params, SignatureRenderer};
use crate::settings::DisplaySettings;
use crate::types::{map_type, out_value_type, Dialect, MappedType};

pub struct LuaRenderer;

impl SignatureRenderer for LuaRenderer {
    fn render(&self, native: &Native, settings: &DisplaySettings) -> String {
        let (inputs, outputs) = partition_params(native);

        let args: Vec<String> = inputs
            .iter()
            .map(|p| format!("{} --[[ {} ]]", p.name, input_type(&p.ty)))
            .collect();
        let call = format!(
            "{}({})",
            display_ident(native, settings.naming),
            args.join(", ")
        );

        let mut bound: Vec<String> = Vec::new();
        if !is_void(&native.return_type) {
            bound.push(format!("retval --[[ {} ]]", input_type(&native.return_type)));
        }
        for p in &outputs {
            bound.push(format!(
                "{} --[[ {} ]]",
                p.name,
                out_value_type(&p.ty, Dialect::Lua)
            ));
        }

        let statement = if bound.is_empty() {
            call
        } else {
            format!("local {} = {}", bound.join(", "), call)
        };

        format!("-- {}\n{}", native.ident(), statement)
    }
}

/// Inputs and return values are always representable; out-parameters never
/// reach this position.
fn input_type(token: &str) -> String {
    match map_type(token, Dialect::Lua) {
        MappedType::Name(name) => name,
        MappedType::Unrepresentable => out_value_type(token, Dialect::Lua),
    }
}
