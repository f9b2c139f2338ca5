//! Incremental materialization of the grouped catalog view.
//!
//! The view holds the whole grouped sequence but turns it into display rows
//! in bounded batches, driven by the host whenever the scroll position
//! approaches the bottom of what is already materialized. Rows are never
//! evicted; only a `reset` replaces them wholesale.

use crate::catalog::{CatalogIndex, RenderGroup};
use crate::model::Native;
use crate::render::display_ident;
use crate::settings::DisplaySettings;
use crate::types::display_type;

/// Entries materialized per batch.
pub const BATCH_SIZE: usize = 100;

/// Scroll proximity to the bottom of the materialized content (in display
/// units) at which the host should request the next batch.
pub const NEAR_BOTTOM: u32 = 200;

/// A materialized list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(String),
    Native(NativeRow),
}

/// Display form of one descriptor row under the current settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeRow {
    pub hash: String,
    pub name: String,
    pub return_type: String,
    /// `type name` pairs; positions the dialect cannot display are dropped
    /// from here, never from the descriptor itself.
    pub params: Vec<String>,
    pub source_available: bool,
    pub example_available: bool,
}

/// Materializes a grouped sequence in bounded batches.
#[derive(Debug, Default)]
pub struct BatchView {
    groups: Vec<RenderGroup>,
    cursor: usize,
    rows: Vec<Row>,
}

impl BatchView {
    /// Replace the sequence, drop every materialized row, and rewind.
    pub fn reset(&mut self, groups: Vec<RenderGroup>) {
        self.groups = groups;
        self.cursor = 0;
        self.rows.clear();
    }

    /// Materialize up to [`BATCH_SIZE`] further entries. Returns how many
    /// were materialized; zero once the cursor has reached the end.
    pub fn render_next_batch(
        &mut self,
        catalog: &CatalogIndex,
        settings: &DisplaySettings,
    ) -> usize {
        let end = (self.cursor + BATCH_SIZE).min(self.groups.len());
        for group in &self.groups[self.cursor..end] {
            match group {
                RenderGroup::Header(ns) => self.rows.push(Row::Header(ns.clone())),
                RenderGroup::Row(idx) => {
                    if let Some(native) = catalog.get(*idx) {
                        self.rows.push(Row::Native(native_row(native, settings)));
                    }
                }
            }
        }
        let materialized = end - self.cursor;
        self.cursor = end;
        materialized
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total length of the grouped sequence, materialized or not.
    pub fn total(&self) -> usize {
        self.groups.len()
    }

    pub fn exhausted(&self) -> bool {
        self.cursor >= self.groups.len()
    }
}

fn native_row(native: &Native, settings: &DisplaySettings) -> NativeRow {
    let params = native
        .params
        .iter()
        .filter_map(|p| {
            display_type(&p.ty, settings.dialect).map(|ty| format!("{} {}", ty, p.name))
        })
        .collect();
    let return_type = display_type(&native.return_type, settings.dialect)
        .unwrap_or_else(|| native.return_type.clone());
    NativeRow {
        hash: native.hash.clone(),
        name: display_ident(native, settings.naming),
        return_type,
        params,
        source_available: native.source_available,
        example_available: native.example_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiSet, Param};
    use crate::settings::NamingConvention;
    use crate::types::Dialect;

    fn entry(hash: &str, name: &str, namespace: &str) -> Native {
        Native {
            hash: hash.to_string(),
            jhash: None,
            name: name.to_string(),
            name_sp: String::new(),
            namespace: namespace.to_string(),
            apiset: ApiSet::Client,
            return_type: "void".to_string(),
            params: Vec::new(),
            build_number: 0,
            source_available: false,
            example_available: false,
            description_original: String::new(),
            description_cn: None,
        }
    }

    fn big_catalog(count: usize) -> CatalogIndex {
        let natives = (0..count)
            .map(|i| entry(&format!("0x{:X}", i + 1), &format!("NATIVE_{:05}", i), "MISC"))
            .collect();
        CatalogIndex::new(natives)
    }

    #[test]
    fn batches_are_bounded_and_cover_everything() {
        let catalog = big_catalog(250);
        let settings = DisplaySettings::default();
        let groups = catalog.filter("", None, None);
        // 250 rows plus one header
        assert_eq!(groups.len(), 251);

        let mut view = BatchView::default();
        view.reset(groups);

        assert_eq!(view.render_next_batch(&catalog, &settings), 100);
        assert_eq!(view.rows().len(), 100);
        assert_eq!(view.render_next_batch(&catalog, &settings), 100);
        assert_eq!(view.render_next_batch(&catalog, &settings), 51);
        assert!(view.exhausted());
        // No re-materialization past the end.
        assert_eq!(view.render_next_batch(&catalog, &settings), 0);
        assert_eq!(view.rows().len(), 251);
    }

    #[test]
    fn reset_replaces_rows_wholesale() {
        let catalog = big_catalog(10);
        let settings = DisplaySettings::default();
        let mut view = BatchView::default();
        view.reset(catalog.filter("", None, None));
        view.render_next_batch(&catalog, &settings);
        assert_eq!(view.rows().len(), 11);

        view.reset(catalog.filter("NATIVE_00003", None, None));
        assert_eq!(view.rows().len(), 0);
        view.render_next_batch(&catalog, &settings);
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn rows_follow_display_settings() {
        let mut native = entry("0x1", "GET_GROUND_Z_FOR_3D_COORD", "MISC");
        native.return_type = "BOOL".to_string();
        native.params = vec![
            Param {
                name: "x".to_string(),
                ty: "float".to_string(),
                description: String::new(),
                description_cn: String::new(),
            },
            Param {
                name: "groundZ".to_string(),
                ty: "float*".to_string(),
                description: String::new(),
                description_cn: String::new(),
            },
        ];
        let catalog = CatalogIndex::new(vec![native]);

        let mut view = BatchView::default();
        view.reset(catalog.filter("", None, None));

        // Raw settings keep the pointer parameter in the row.
        let raw = DisplaySettings::default();
        view.render_next_batch(&catalog, &raw);
        match &view.rows()[1] {
            Row::Native(row) => {
                assert_eq!(row.params, ["float x", "float* groundZ"]);
                assert_eq!(row.return_type, "BOOL");
            }
            other => panic!("expected native row, got {:?}", other),
        }

        // Lua settings drop the display-unrepresentable out-parameter.
        let lua = DisplaySettings {
            dialect: Dialect::Lua,
            naming: NamingConvention::Alternate,
            ..DisplaySettings::default()
        };
        view.reset(catalog.filter("", None, None));
        view.render_next_batch(&catalog, &lua);
        match &view.rows()[1] {
            Row::Native(row) => {
                assert_eq!(row.params, ["number x"]);
                assert_eq!(row.return_type, "boolean");
                assert_eq!(row.name, "GetGroundZFor3dCoord");
            }
            other => panic!("expected native row, got {:?}", other),
        }
    }
}
