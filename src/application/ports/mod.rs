mod message_resolver;
mod message_source;

pub use message_resolver::MessageResolver;
pub use message_source::{MessageError, MessageSource};

#[cfg(test)]
pub use message_resolver::MockMessageResolver;
#[cfg(test)]
pub use message_source::MockMessageSource;
