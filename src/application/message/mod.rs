//! Message resolution: template interpolation and the code-fallback resolver

pub mod format;
pub mod resolver;

pub use format::{format_template, FormatError};
pub use resolver::MessageSourceResolver;
