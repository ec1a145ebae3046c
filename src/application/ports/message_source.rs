#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::value_objects::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("No message found under code '{code}' for locale '{locale}'")]
    NotFound { code: String, locale: String },

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Malformed template for '{code}': {reason}")]
    MalformedTemplate { code: String, reason: String },
}

/// Port for localized message template lookup
///
/// Implementations format `args` into the template themselves and report
/// every failure as an error; deciding what to show instead is the
/// resolver's job.
#[cfg_attr(test, automock)]
pub trait MessageSource: Send + Sync {
    fn get_message(
        &self,
        code: &str,
        args: &[String],
        locale: &Locale,
    ) -> Result<String, MessageError>;
}
