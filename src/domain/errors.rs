use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid locale tag: {0:?}")]
    InvalidLocale(String),
}
