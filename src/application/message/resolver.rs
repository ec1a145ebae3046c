use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{MessageResolver, MessageSource};
use crate::domain::value_objects::Locale;

/// Resolves codes through a [`MessageSource`] in one fixed locale.
///
/// Lookup or formatting failures are not surfaced: the code itself is
/// returned in place of the message.
pub struct MessageSourceResolver<S> {
    source: S,
    locale: Locale,
}

impl<S: MessageSource> MessageSourceResolver<S> {
    /// Resolver using the process default locale (Korean)
    pub fn new(source: S) -> Self {
        Self::with_locale(source, Locale::default())
    }

    pub fn with_locale(source: S, locale: Locale) -> Self {
        Self { source, locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: MessageSource> MessageResolver for MessageSourceResolver<S> {
    fn resolve(&self, code: &str, args: &[String]) -> String {
        match self.source.get_message(code, args, &self.locale) {
            Ok(message) => message,
            Err(e) => {
                debug!(code = %code, locale = %self.locale, error = %e, "message_resolution_fallback");
                code.to_string()
            }
        }
    }
}

impl<S: MessageSource + ?Sized> MessageSource for Arc<S> {
    fn get_message(
        &self,
        code: &str,
        args: &[String],
        locale: &Locale,
    ) -> Result<String, crate::application::ports::MessageError> {
        (**self).get_message(code, args, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MessageError, MockMessageSource};
    use mockall::predicate::*;

    #[test]
    fn test_resolve_returns_source_message() {
        let mut source = MockMessageSource::new();
        source
            .expect_get_message()
            .with(
                eq("NOT_FOUND"),
                function(|args: &[String]| args.is_empty()),
                eq(Locale::korean()),
            )
            .times(1)
            .returning(|_, _, _| Ok("요청하신 리소스를 찾을 수 없습니다.".to_string()));

        let resolver = MessageSourceResolver::new(source);
        assert_eq!(
            resolver.resolve("NOT_FOUND", &[]),
            "요청하신 리소스를 찾을 수 없습니다."
        );
    }

    #[test]
    fn test_resolve_passes_arguments_in_order() {
        let mut source = MockMessageSource::new();
        source
            .expect_get_message()
            .withf(|code, args, _| code == "TYPE_MISMATCH" && args == ["id", "abc"])
            .times(1)
            .returning(|_, args, _| Ok(format!("{} <- {}", args[0], args[1])));

        let resolver = MessageSourceResolver::new(source);
        let args = vec!["id".to_string(), "abc".to_string()];
        assert_eq!(resolver.resolve("TYPE_MISMATCH", &args), "id <- abc");
    }

    #[test]
    fn test_resolve_falls_back_to_code_on_any_error() {
        let errors = vec![
            MessageError::NotFound {
                code: "UNKNOWN".to_string(),
                locale: "ko".to_string(),
            },
            MessageError::InvalidLocale("xx".to_string()),
            MessageError::MalformedTemplate {
                code: "UNKNOWN".to_string(),
                reason: "unclosed".to_string(),
            },
        ];

        for error in errors {
            let mut source = MockMessageSource::new();
            source
                .expect_get_message()
                .returning(move |_, _, _| Err(error.clone()));

            let resolver = MessageSourceResolver::new(source);
            assert_eq!(resolver.resolve("UNKNOWN", &[]), "UNKNOWN");
        }
    }

    #[test]
    fn test_resolver_uses_configured_locale() {
        let mut source = MockMessageSource::new();
        source
            .expect_get_message()
            .withf(|_, _, locale| locale.tag() == "en-US")
            .returning(|_, _, _| Ok("Not found".to_string()));

        let resolver =
            MessageSourceResolver::with_locale(source, Locale::parse("en-US").unwrap());
        assert_eq!(resolver.locale().tag(), "en-US");
        assert_eq!(resolver.resolve("NOT_FOUND", &[]), "Not found");
    }
}
