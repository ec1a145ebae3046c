//! Fault translation middleware
//!
//! Replaces faults raised by handlers and extractors with dispatched error
//! envelopes. Error answers that carry no fault, the router's bare 405 and
//! axum's own extractor rejections among them, are turned into faults first.
//!
//! - config.rs: which router answers are translated
//! - middleware.rs: the tower layer and service
//! - utils.rs: response inspection helpers

pub mod config;
pub mod middleware;
pub mod utils;

pub use config::FaultTranslationConfig;
pub use middleware::{FaultTranslationLayer, FaultTranslationService};
pub use utils::FaultUtils;
