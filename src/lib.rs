//! # fault_translator - Uniform API Error Responses
//!
//! Turns every failure raised while handling a request into one envelope,
//! `{ "code", "message", "details"? }`, with messages resolved from a
//! locale-aware template catalog.
//!
//! ## Architecture Layers
//!
//! - **Domain**: error codes, faults, field errors and the response envelope
//! - **Application**: message resolution, validation diagnostics, dispatch
//! - **Infrastructure**: the TOML message catalog
//! - **API**: axum extractors, fallback and the translation middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{routing::get, Router};
//! use fault_translator::{
//!     api::{apply_fault_translation, ApiResult},
//!     ApplicationBuilder, BusinessFault, Config, GlobalErrorCode,
//! };
//!
//! async fn find_order() -> ApiResult<String> {
//!     Err(BusinessFault::with_args(GlobalErrorCode::NotFound, ["order"]).into())
//! }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = ApplicationBuilder::new(Config::default())
//!     .with_catalog()?
//!     .build()?;
//! let app: Router = apply_fault_translation(
//!     Router::new().route("/orders/{id}", get(find_order)),
//!     dispatcher,
//! );
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{ApplicationBuilder, FaultDispatcher, FaultResponse};
pub use config::Config;
pub use domain::{
    BusinessFault, ErrorCode, ErrorResponse, Fault, FaultKind, FieldError, GlobalErrorCode,
    Violation,
};
pub use infrastructure::messages::MessageCatalog;
