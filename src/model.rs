//! Data model for the native catalog — wire-format faithful, dialect-agnostic.

use anyhow::{Context, Result};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// API access tier of a native.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiSet {
    #[default]
    Client,
    Server,
    Shared,
}

impl ApiSet {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiSet::Client => "client",
            ApiSet::Server => "server",
            ApiSet::Shared => "shared",
        }
    }
}

impl FromStr for ApiSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(ApiSet::Client),
            "server" => Ok(ApiSet::Server),
            "shared" => Ok(ApiSet::Shared),
            other => Err(format!(
                "unknown api set: {}. Use client, server, or shared",
                other
            )),
        }
    }
}

impl Serialize for ApiSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Unknown tiers fall back to the backend's column default.
        Ok(s.parse().unwrap_or(ApiSet::Client))
    }
}

/// One parameter of a native, in call-site position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Canonical type token, e.g. `int`, `char*`, `Vector3`, `float*`.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_cn: String,
}

/// Canonical record for one documented native function.
///
/// The parameter order is significant — it encodes call-site positional
/// order and is preserved verbatim through every transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Native {
    /// Stable unique key, `0x…` form.
    pub hash: String,
    #[serde(default)]
    pub jhash: Option<String>,
    /// Display name; empty for natives known only by hash.
    #[serde(default)]
    pub name: String,
    /// Alternate identifier used under the alternate naming convention.
    #[serde(default)]
    pub name_sp: String,
    pub namespace: String,
    #[serde(default)]
    pub apiset: ApiSet,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub build_number: u32,
    #[serde(default)]
    pub source_available: bool,
    #[serde(default)]
    pub example_available: bool,
    #[serde(default)]
    pub description_original: String,
    #[serde(default)]
    pub description_cn: Option<String>,
}

fn default_return_type() -> String {
    "void".to_string()
}

impl Native {
    /// Raw identifier: the name when present, the hash otherwise.
    pub fn ident(&self) -> &str {
        if self.name.is_empty() {
            &self.hash
        } else {
            &self.name
        }
    }

    /// Identifier preferred under the alternate naming convention.
    pub fn alternate_ident(&self) -> &str {
        if self.name_sp.is_empty() {
            self.ident()
        } else {
            &self.name_sp
        }
    }

    /// Merge a detail-fetch response into the in-memory record.
    ///
    /// The bulk listing omits descriptions and may carry thinner params;
    /// enrichment fills those in without disturbing anything else.
    pub fn merge_detail(&mut self, resp: &DetailResponse) {
        let d = &resp.data;
        if !d.params.is_empty() {
            self.params = d.params.clone();
        }
        if !d.name_sp.is_empty() {
            self.name_sp = d.name_sp.clone();
        }
        self.description_original = d.description_original.clone();
        self.description_cn = d.description_cn.clone();
        self.source_available = self.source_available || resp.source_available;
    }
}

/// Detail endpoint envelope: the enriched record plus a source flag.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub data: Native,
    #[serde(default)]
    pub source_available: bool,
}

/// Reverse-engineered source attached to a native. Display only.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceCode {
    pub content: String,
    #[serde(rename = "lang")]
    pub language: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

/// Contributed example snippet attached to a native. Display only.
#[derive(Debug, Clone, Deserialize)]
pub struct Example {
    pub id: i64,
    pub language: String,
    pub code: String,
}

/// Load a catalog from a local JSON file shaped like the bulk listing
/// endpoint's response.
pub fn load_catalog_file(path: &Path) -> Result<Vec<Native>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("malformed catalog file: {}", path.display()))
}
