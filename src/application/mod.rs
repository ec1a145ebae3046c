pub mod builder;
pub mod diagnostics;
pub mod dispatcher;
pub mod message;
pub mod ports;

pub use builder::{ApplicationBuilder, BuildError};
pub use dispatcher::{DispatcherConfig, FaultBody, FaultDispatcher, FaultResponse};
pub use message::MessageSourceResolver;
