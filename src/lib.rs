//! natview — signature synthesis and incremental catalog rendering engine
//! for a native-function documentation viewer.
//!
//! The engine turns language-agnostic function descriptors into idiomatic
//! call-site text for several presentation dialects, and derives filtered,
//! grouped, batch-materialized views over catalogs of tens of thousands of
//! entries. The `natview` binary is a thin terminal presentation layer; any
//! other front end can drive the same five entry points: `filter`,
//! `synthesize`, `render_next_batch`, `select`, `on_settings_committed`.

pub mod catalog;
pub mod client;
pub mod controller;
pub mod model;
pub mod render;
pub mod settings;
pub mod types;
pub mod view;

pub use catalog::{CatalogIndex, RenderGroup};
pub use controller::{App, Debouncer, DetailTicket, DetailView, FilterState, SEARCH_DEBOUNCE};
pub use model::{ApiSet, Native, Param};
pub use render::{synthesize, Signature};
pub use settings::{DisplaySettings, NamingConvention};
pub use types::Dialect;
pub use view::{BatchView, Row, BATCH_SIZE, NEAR_BOTTOM};
