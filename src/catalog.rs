//! Catalog index — filtering, ordering, and namespace grouping.
//!
//! The index owns the full descriptor set for a session. Every filter pass
//! derives a fresh grouped sequence; nothing is diffed or patched in place,
//! so identical inputs always produce identical output.

use crate::model::{ApiSet, Native};
use std::cmp::Ordering;

/// One entry in the grouped render sequence: a namespace header, or the
/// position of a descriptor in the index's backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderGroup {
    Header(String),
    Row(usize),
}

/// Owns the full descriptor set and derives filtered, grouped views.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    natives: Vec<Native>,
}

impl CatalogIndex {
    pub fn new(natives: Vec<Native>) -> Self {
        CatalogIndex { natives }
    }

    pub fn len(&self) -> usize {
        self.natives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Native> {
        self.natives.get(idx)
    }

    pub fn by_hash(&self, hash: &str) -> Option<&Native> {
        self.natives.iter().find(|n| n.hash == hash)
    }

    pub(crate) fn by_hash_mut(&mut self, hash: &str) -> Option<&mut Native> {
        self.natives.iter_mut().find(|n| n.hash == hash)
    }

    /// Resolve a user-supplied identifier: exact hash first, then exact
    /// name, both case-insensitive.
    pub fn resolve(&self, ident: &str) -> Option<&Native> {
        self.natives
            .iter()
            .find(|n| n.hash.eq_ignore_ascii_case(ident))
            .or_else(|| {
                self.natives
                    .iter()
                    .find(|n| !n.name.is_empty() && n.name.eq_ignore_ascii_case(ident))
            })
    }

    /// Sorted, deduplicated namespace list for the filter dropdown.
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> =
            self.natives.iter().map(|n| n.namespace.clone()).collect();
        namespaces.sort();
        namespaces.dedup();
        namespaces
    }

    /// Filter, sort, and group the catalog into a render sequence.
    ///
    /// A descriptor matches `query` when the case-insensitive query is a
    /// substring of its hash, its name, its alternate name, or its name
    /// with `_` separators stripped (search-without-underscores). `None`
    /// filters disable the apiset/namespace checks.
    pub fn filter(
        &self,
        query: &str,
        apiset: Option<ApiSet>,
        namespace: Option<&str>,
    ) -> Vec<RenderGroup> {
        let query = query.to_lowercase();
        let mut matched: Vec<usize> = self
            .natives
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                matches_query(n, &query)
                    && apiset.map_or(true, |a| n.apiset == a)
                    && namespace.map_or(true, |ns| n.namespace == ns)
            })
            .map(|(idx, _)| idx)
            .collect();

        matched.sort_by(|&a, &b| {
            let (na, nb) = (&self.natives[a], &self.natives[b]);
            collate(&na.namespace, &nb.namespace)
                .then_with(|| collate(na.ident(), nb.ident()))
                .then_with(|| na.hash.cmp(&nb.hash))
        });

        let mut groups = Vec::with_capacity(matched.len() + 8);
        let mut last_ns: Option<&str> = None;
        for idx in matched {
            let ns = self.natives[idx].namespace.as_str();
            if last_ns != Some(ns) {
                groups.push(RenderGroup::Header(ns.to_string()));
                last_ns = Some(ns);
            }
            groups.push(RenderGroup::Row(idx));
        }
        groups
    }
}

fn matches_query(native: &Native, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let name = native.name.to_lowercase();
    name.contains(query)
        || native.hash.to_lowercase().contains(query)
        || native.name_sp.to_lowercase().contains(query)
        || name.replace('_', "").contains(query)
}

/// Case-insensitive lexicographic order with a case-sensitive tiebreak, so
/// names equal ignoring case still order deterministically.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
