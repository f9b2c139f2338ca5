//! Selection and settings orchestration over the catalog engine.
//!
//! [`App`] owns every piece of process-wide state — the descriptor set, the
//! committed settings, the materialized view, and the current selection —
//! and is only ever touched from the host's single event loop. Detail
//! fetches are fire-and-forget: each `select` issues a ticket, and a
//! completion whose ticket no longer matches is silently discarded so a
//! stale response can never overwrite a newer selection.

use crate::catalog::CatalogIndex;
use crate::model::{ApiSet, DetailResponse, Native, Param};
use crate::render::{synthesize, Signature};
use crate::settings::DisplaySettings;
use crate::view::BatchView;
use std::time::{Duration, Instant};

/// Fixed quiet period for search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Gates an action behind a quiet period. The clock is injected so hosts
/// and tests control time; the debouncer itself never sleeps.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            deadline: None,
        }
    }

    /// Register an input event at `now`, pushing the deadline out.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True once the quiet period has elapsed since the last poke; clears
    /// the pending deadline so the action fires at most once per pause.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Ticket pairing a detail fetch with the selection that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
}

/// Current filter inputs for the catalog view.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub query: String,
    pub apiset: Option<ApiSet>,
    pub namespace: Option<String>,
}

/// Locally-renderable content of the detail panel.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub hash: String,
    pub jhash: Option<String>,
    pub name: String,
    pub namespace: String,
    pub apiset: ApiSet,
    pub signature: Signature,
    pub params: Vec<Param>,
    pub description: String,
}

impl DetailView {
    fn build(native: &Native, settings: &DisplaySettings) -> Self {
        let description = native
            .description_cn
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if native.description_original.is_empty() {
                    "No description available.".to_string()
                } else {
                    native.description_original.clone()
                }
            });
        DetailView {
            hash: native.hash.clone(),
            jhash: native.jhash.clone(),
            name: crate::render::display_ident(native, settings.naming),
            namespace: native.namespace.clone(),
            apiset: native.apiset,
            signature: synthesize(native, settings),
            params: native.params.clone(),
            description,
        }
    }
}

/// Owned application state; the single entry point for every mutation.
pub struct App {
    catalog: CatalogIndex,
    settings: DisplaySettings,
    view: BatchView,
    filter: FilterState,
    selected: Option<String>,
    in_flight: Option<(String, DetailTicket)>,
    generation: u64,
    /// Inline, non-fatal transport message; cleared by the next action.
    pub last_error: Option<String>,
}

impl App {
    pub fn new(natives: Vec<Native>, settings: DisplaySettings) -> Self {
        let mut app = App {
            catalog: CatalogIndex::new(natives),
            settings,
            view: BatchView::default(),
            filter: FilterState::default(),
            selected: None,
            in_flight: None,
            generation: 0,
            last_error: None,
        };
        app.refresh();
        app
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn view(&self) -> &BatchView {
        &self.view
    }

    /// Re-run the filter under current inputs and materialize the first
    /// batch. Replaces the previous view wholesale.
    pub fn refresh(&mut self) {
        let groups = self.catalog.filter(
            &self.filter.query,
            self.filter.apiset,
            self.filter.namespace.as_deref(),
        );
        self.view.reset(groups);
        self.view.render_next_batch(&self.catalog, &self.settings);
    }

    /// Commit new filter inputs (the debounced search path).
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.last_error = None;
        self.refresh();
    }

    /// Materialize one more batch; returns how many entries were added.
    pub fn render_next_batch(&mut self) -> usize {
        self.view.render_next_batch(&self.catalog, &self.settings)
    }

    /// Select a descriptor. Returns the locally-known detail view plus a
    /// ticket for the asynchronous enrichment; `None` for unknown ids.
    pub fn select(&mut self, hash: &str) -> Option<(DetailView, DetailTicket)> {
        let native = self.catalog.by_hash(hash)?;
        let detail = DetailView::build(native, &self.settings);
        self.selected = Some(hash.to_string());
        self.generation += 1;
        let ticket = DetailTicket {
            generation: self.generation,
        };
        self.in_flight = Some((hash.to_string(), ticket));
        self.last_error = None;
        Some((detail, ticket))
    }

    pub fn selected_hash(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.in_flight = None;
    }

    /// Apply a completed detail fetch. A ticket that no longer matches the
    /// outstanding request is stale: it is discarded and `None` returned.
    pub fn apply_detail(
        &mut self,
        ticket: DetailTicket,
        resp: &DetailResponse,
    ) -> Option<DetailView> {
        let (hash, current) = self.in_flight.clone()?;
        if current != ticket {
            return None;
        }
        self.in_flight = None;
        let settings = self.settings.clone();
        let native = self.catalog.by_hash_mut(&hash)?;
        native.merge_detail(resp);
        Some(DetailView::build(native, &settings))
    }

    /// Record a failed detail fetch. Previously rendered state is retained;
    /// the message is surfaced inline. Stale failures are dropped outright.
    pub fn detail_failed(&mut self, ticket: DetailTicket, message: String) {
        if self.in_flight.as_ref().map(|(_, t)| *t) == Some(ticket) {
            self.in_flight = None;
            self.last_error = Some(message);
        }
    }

    /// Commit new settings: swap the record atomically, re-synthesize the
    /// current selection's signature, and rebuild the catalog view under
    /// the new settings. No data is re-fetched.
    pub fn on_settings_committed(&mut self, settings: DisplaySettings) -> Option<Signature> {
        self.settings = settings;
        self.refresh();
        self.selected_signature()
    }

    /// Current selection's signature under current settings.
    pub fn selected_signature(&self) -> Option<Signature> {
        self.selected
            .as_deref()
            .and_then(|hash| self.catalog.by_hash(hash))
            .map(|native| synthesize(native, &self.settings))
    }

    /// Locally apply a saved description translation (post-submit
    /// bookkeeping; the write itself is the backend's concern).
    pub fn apply_translation(&mut self, hash: &str, text: &str) -> bool {
        match self.catalog.by_hash_mut(hash) {
            Some(native) => {
                native.description_cn = Some(text.to_string());
                true
            }
            None => false,
        }
    }

    /// Locally apply saved per-parameter translations, matched by name.
    pub fn apply_param_docs(&mut self, hash: &str, docs: &[(String, String)]) -> bool {
        match self.catalog.by_hash_mut(hash) {
            Some(native) => {
                for param in &mut native.params {
                    if let Some((_, text)) = docs.iter().find(|(name, _)| *name == param.name) {
                        param.description_cn = text.clone();
                    }
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::NamingConvention;
    use crate::types::Dialect;
    use crate::view::Row;

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

    fn detail_resp(hash: &str, name: &str, description: &str) -> DetailResponse {
        let mut native = entry(hash, name, "PLAYER");
        native.description_original = description.to_string();
        DetailResponse {
            data: native,
            source_available: false,
        }
    }

    fn app() -> App {
        App::new(
            vec![
                entry("0x1", "GET_PLAYER_PED", "PLAYER"),
                entry("0x2", "GET_PLAYER_NAME", "PLAYER"),
            ],
            DisplaySettings::default(),
        )
    }

    #[test]
    fn select_returns_local_view_and_ticket() {
        let mut app = app();
        let (view, _ticket) = app.select("0x1").unwrap();
        assert_eq!(view.hash, "0x1");
        assert_eq!(view.description, "No description available.");
        assert_eq!(app.selected_hash(), Some("0x1"));
    }

    #[test]
    fn stale_detail_response_is_discarded() {
        let mut app = app();
        let (_, first) = app.select("0x1").unwrap();
        let (_, second) = app.select("0x2").unwrap();

        // The first fetch resolves after the user re-selected.
        let late = detail_resp("0x1", "GET_PLAYER_PED", "stale");
        assert!(app.apply_detail(first, &late).is_none());
        assert_eq!(app.selected_hash(), Some("0x2"));

        let fresh = detail_resp("0x2", "GET_PLAYER_NAME", "Returns the player name.");
        let view = app.apply_detail(second, &fresh).unwrap();
        assert_eq!(view.description, "Returns the player name.");
    }

    #[test]
    fn detail_failure_is_inline_and_non_fatal() {
        let mut app = app();
        let (_, ticket) = app.select("0x1").unwrap();
        let rows_before = app.view().rows().len();
        app.detail_failed(ticket, "request failed: /api/native/0x1".to_string());
        assert_eq!(app.last_error.as_deref(), Some("request failed: /api/native/0x1"));
        assert_eq!(app.view().rows().len(), rows_before);
        assert_eq!(app.selected_hash(), Some("0x1"));
    }

    #[test]
    fn stale_failure_is_dropped() {
        let mut app = app();
        let (_, first) = app.select("0x1").unwrap();
        let (_, _second) = app.select("0x2").unwrap();
        app.detail_failed(first, "too late".to_string());
        assert!(app.last_error.is_none());
    }

    #[test]
    fn settings_commit_rerenders_and_resynthesizes() {
        let mut app = app();
        app.select("0x1");
        let committed = DisplaySettings {
            dialect: Dialect::Lua,
            naming: NamingConvention::Alternate,
            ..DisplaySettings::default()
        };
        let signature = app.on_settings_committed(committed).unwrap();
        assert_eq!(signature.highlight, "lua");
        assert!(signature.text.contains("GetPlayerPed()"));

        // The first batch re-materialized under the new settings.
        let renamed = app.view().rows().iter().any(|row| match row {
            Row::Native(row) => row.name == "GetPlayerPed",
            Row::Header(_) => false,
        });
        assert!(renamed);
    }

    #[test]
    fn filter_change_replaces_the_view() {
        let mut app = app();
        assert_eq!(app.view().total(), 3); // header + two rows
        app.set_filter(FilterState {
            query: "name".to_string(),
            ..FilterState::default()
        });
        assert_eq!(app.view().total(), 2); // header + one row
    }

    #[test]
    fn enrichment_mutates_the_record_in_place() {
        let mut app = app();
        let (_, ticket) = app.select("0x1").unwrap();
        let resp = detail_resp("0x1", "GET_PLAYER_PED", "Returns the ped.");
        app.apply_detail(ticket, &resp).unwrap();
        assert_eq!(
            app.catalog().by_hash("0x1").unwrap().description_original,
            "Returns the ped."
        );
    }

    #[test]
    fn local_edits_apply_in_place() {
        let mut app = app();
        assert!(app.apply_translation("0x1", "获取玩家角色。"));
        let (view, _) = app.select("0x1").unwrap();
        assert_eq!(view.description, "获取玩家角色。");
        assert!(!app.apply_translation("0xFF", "nope"));
    }

    #[test]
    fn param_docs_merge_by_name() {
        let mut app = app();
        {
            let (_, ticket) = app.select("0x1").unwrap();
            let mut enriched = entry("0x1", "GET_PLAYER_PED", "PLAYER");
            enriched.params = vec![Param {
                name: "playerIndex".to_string(),
                ty: "int".to_string(),
                description: "The player index.".to_string(),
                description_cn: String::new(),
            }];
            let resp = DetailResponse {
                data: enriched,
                source_available: false,
            };
            app.apply_detail(ticket, &resp).unwrap();
        }
        assert!(app.apply_param_docs(
            "0x1",
            &[("playerIndex".to_string(), "玩家索引".to_string())]
        ));
        let native = app.catalog().by_hash("0x1").unwrap();
        assert_eq!(native.params[0].description_cn, "玩家索引");
        // Unknown parameter names are simply skipped.
        assert!(app.apply_param_docs("0x1", &[("nope".to_string(), "x".to_string())]));
        assert!(!app.apply_param_docs("0xFF", &[]));
    }

    #[test]
    fn debouncer_fires_once_per_quiet_period() {
        let mut debounce = Debouncer::new(SEARCH_DEBOUNCE);
        let start = Instant::now();
        debounce.poke(start);
        assert!(!debounce.fire(start));
        assert!(!debounce.fire(start + Duration::from_millis(299)));

        // Typing again pushes the deadline out.
        debounce.poke(start + Duration::from_millis(200));
        assert!(!debounce.fire(start + Duration::from_millis(350)));
        assert!(debounce.fire(start + Duration::from_millis(500)));

        // Fired — nothing pending until the next poke.
        assert!(!debounce.pending());
        assert!(!debounce.fire(start + Duration::from_millis(900)));
    }
}
