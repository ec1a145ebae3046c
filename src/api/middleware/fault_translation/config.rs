use serde::{Deserialize, Serialize};

/// Fault translation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultTranslationConfig {
    /// Turn bodiless 405 answers from the router into method faults
    pub translate_method_not_allowed: bool,
    /// Turn other 4xx/5xx answers that carry no fault, such as axum's own
    /// extractor rejections, into faults
    pub translate_bare_errors: bool,
    /// Install `CatchPanicLayer` so handler panics reach the catch-all branch
    pub catch_panics: bool,
    /// Install a `TraceLayer` request span around the router
    pub trace_requests: bool,
}

impl Default for FaultTranslationConfig {
    fn default() -> Self {
        Self {
            translate_method_not_allowed: true,
            translate_bare_errors: true,
            catch_panics: true,
            trace_requests: true,
        }
    }
}

impl FaultTranslationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method_not_allowed(mut self, enabled: bool) -> Self {
        self.translate_method_not_allowed = enabled;
        self
    }

    pub fn with_bare_errors(mut self, enabled: bool) -> Self {
        self.translate_bare_errors = enabled;
        self
    }

    pub fn with_panic_catching(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    pub fn with_request_tracing(mut self, enabled: bool) -> Self {
        self.trace_requests = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = FaultTranslationConfig::default();

        assert!(config.translate_method_not_allowed);
        assert!(config.translate_bare_errors);
        assert!(config.catch_panics);
        assert!(config.trace_requests);
    }

    #[test]
    fn test_builder() {
        let config = FaultTranslationConfig::new()
            .with_method_not_allowed(false)
            .with_bare_errors(false)
            .with_request_tracing(false);

        assert!(!config.translate_method_not_allowed);
        assert!(!config.translate_bare_errors);
        assert!(config.catch_panics);
        assert!(!config.trace_requests);
    }
}
