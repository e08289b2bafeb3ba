pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http_client::DealMindClient;
pub use app::{build_router, serve, serve_listener, AppState, SharedState};
pub use crate::core::{catalog::SummaryCatalog, projection::project, summary::SummaryService};
pub use utils::error::{DealMindError, Result};
