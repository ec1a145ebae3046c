//! Property-based tests using proptest
//!
//! Invariants of diagnostics extraction, template formatting, message
//! fallback and catch-all dispatch, checked over generated inputs.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::Value;

use fault_translator::{
    application::{
        diagnostics::extract,
        message::{format_template, MessageSourceResolver},
        ports::MessageResolver,
    },
    domain::value_objects::Locale,
    Fault, FaultDispatcher, FieldError, MessageCatalog, Violation,
};

/// Strategy for generating field or global violations
fn violation_strategy() -> impl Strategy<Value = Violation> {
    prop_oneof![
        (
            "f_[a-zA-Z0-9_.]{0,15}",
            proptest::option::of(any::<i64>()),
            ".{0,40}"
        )
            .prop_map(|(field, value, description)| {
                Violation::field(field, value.map(Value::from), description)
            }),
        ".{0,40}".prop_map(Violation::global),
    ]
}

/// Strategy for template text without braces or quotes
fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[^{}']{0,40}"
}

proptest! {
    #[test]
    fn test_extract_preserves_count(violations in prop::collection::vec(violation_strategy(), 0..20)) {
        let errors = extract(violations.clone());
        prop_assert_eq!(errors.len(), violations.len());
    }

    #[test]
    fn test_extract_puts_field_errors_first(violations in prop::collection::vec(violation_strategy(), 0..20)) {
        let field_count = violations.iter().filter(|v| !v.is_global()).count();
        let errors = extract(violations);

        prop_assert!(errors[..field_count].iter().all(|e| !e.is_global()));
        prop_assert!(errors[field_count..].iter().all(FieldError::is_global));
    }

    #[test]
    fn test_extract_keeps_reasons_and_relative_order(violations in prop::collection::vec(violation_strategy(), 0..20)) {
        let expected_fields: Vec<String> = violations
            .iter()
            .filter(|v| !v.is_global())
            .map(|v| v.description().to_string())
            .collect();
        let expected_globals: Vec<String> = violations
            .iter()
            .filter(|v| v.is_global())
            .map(|v| v.description().to_string())
            .collect();

        let errors = extract(violations);
        let (fields, globals): (Vec<FieldError>, Vec<FieldError>) =
            errors.into_iter().partition(|e| !e.is_global());

        prop_assert_eq!(fields.into_iter().map(|e| e.reason).collect::<Vec<_>>(), expected_fields);
        prop_assert_eq!(globals.into_iter().map(|e| e.reason).collect::<Vec<_>>(), expected_globals);
    }

    #[test]
    fn test_format_without_args_is_identity(template in ".{0,60}") {
        prop_assert_eq!(format_template(&template, &[]).unwrap(), template);
    }

    #[test]
    fn test_format_substitutes_arguments(
        prefix in plain_text_strategy(),
        suffix in plain_text_strategy(),
        arg in ".{0,20}",
    ) {
        let template = format!("{prefix}{{0}}{suffix}");
        let formatted = format_template(&template, &[arg.clone()]).unwrap();
        prop_assert_eq!(formatted, format!("{prefix}{arg}{suffix}"));
    }

    #[test]
    fn test_unknown_codes_resolve_to_themselves(code in "[A-Z][A-Z_]{0,30}", args in prop::collection::vec(".{0,10}", 0..3)) {
        prop_assume!(MessageCatalog::bundled().template(&code, &Locale::korean()).is_none());

        let resolver = MessageSourceResolver::new(MessageCatalog::bundled());
        prop_assert_eq!(resolver.resolve(&code, &args), code);
    }

    #[test]
    fn test_catch_all_is_total(message in ".{0,60}") {
        let resolver = Arc::new(MessageSourceResolver::new(MessageCatalog::bundled()));
        let dispatcher = FaultDispatcher::new(resolver);

        let response = dispatcher.dispatch(&Fault::unclassified(anyhow::anyhow!(message)));

        prop_assert_eq!(response.status.as_u16(), 500);
        prop_assert_eq!(response.body.code.as_str(), "INTERNAL_SERVER_ERROR");
        prop_assert_eq!(
            response.body.message.as_str(),
            "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
        );
        prop_assert!(response.body.details.is_none());
    }
}
