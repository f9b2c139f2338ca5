//! JavaScript dialect — typed call with destructured result bindings.
//!
//! Inputs carry `name: type` annotations. Out-parameters come back on the
//! return channel: a lone bound value is assigned directly, two or more
//! destructure into a bracketed tuple, mapped return value first.

use crate::model::Native;
use crate::render::{display_ident, is_void, partition_params, SignatureRenderer};
use crate::settings::DisplaySettings;
use crate::types::{map_type, out_value_type, Dialect, MappedType};

pub struct JsRenderer;

impl SignatureRenderer for JsRenderer {
    fn render(&self, native: &Native, settings: &DisplaySettings) -> String {
        let (inputs, outputs) = partition_params(native);

        let args: Vec<String> = inputs
            .iter()
            .map(|p| format!("{}: {}", p.name, input_type(&p.ty)))
            .collect();
        let call = format!(
            "{}({})",
            display_ident(native, settings.naming),
            args.join(", ")
        );

        let mut bound: Vec<String> = Vec::new();
        if !is_void(&native.return_type) {
            bound.push("retval".to_string());
        }
        for p in &outputs {
            bound.push(p.name.clone());
        }

        let statement = match bound.len() {
            0 => format!("{};", call),
            1 => format!("const {} = {};", bound[0], call),
            _ => format!("const [{}] = {};", bound.join(", "), call),
        };

        format!("// {}\n{}", native.ident(), statement)
    }
}

fn input_type(token: &str) -> String {
    match map_type(token, Dialect::JavaScript) {
        MappedType::Name(name) => name,
        MappedType::Unrepresentable => out_value_type(token, Dialect::JavaScript),
    }
}
