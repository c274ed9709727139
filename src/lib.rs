//! Product search facade over the Mercado Livre marketplace API.
//!
//! A request to `/buscar?q=` is validated, forwarded to the marketplace
//! search endpoint, and the first three hits are reshaped into [`Product`]s.
//! When the marketplace rejects our credentials and tolerant auth is on, a
//! deterministic mock catalogue is served instead.
//!
//! ## Modules
//! - **`adapters`**: HTTP client for the marketplace.
//! - **`config`**: environment-driven [`AppConfig`].
//! - **`error`**: upstream, search and HTTP boundary errors.
//! - **`mock`**: fallback catalogue.
//! - **`models`**: search results and the full listing model.
//! - **`response`**: success and error envelopes.
//! - **`routes`**: axum router, handlers and middleware.
//! - **`service`**: query validation and the search orchestrator.
//! - **`telemetry`**: tracing setup.

pub mod adapters;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod telemetry;

pub use config::{AppConfig, RuntimeMode};
pub use error::{ApiError, SearchError, UpstreamError};
pub use models::{Product, SearchResult};
pub use routes::{AppState, build_router};
pub use service::{SearchQuery, SearchService};
