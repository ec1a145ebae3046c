//! Validation diagnostics
//!
//! [`extract`] turns an ordered violation list into the `details` payload of
//! a validation error response. The rest of this module adapts the
//! `validator` crate's error tree into such a list.

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::domain::field_error::{FieldError, Violation};

/// Key `validator` uses for struct-level (schema) errors
const STRUCT_LEVEL_KEY: &str = "__all__";

/// Normalize violations into field errors.
///
/// Field-scoped entries come first, then global ones; each group keeps the
/// order it had in `violations`. Descriptions are copied verbatim.
pub fn extract<I>(violations: I) -> Vec<FieldError>
where
    I: IntoIterator<Item = Violation>,
{
    let (global, scoped): (Vec<Violation>, Vec<Violation>) =
        violations.into_iter().partition(Violation::is_global);

    scoped
        .into_iter()
        .chain(global)
        .map(|violation| match violation {
            Violation::Field {
                field,
                rejected_value,
                description,
            } => FieldError::new(field, rejected_value, description),
            Violation::Global { description } => FieldError::global(description),
        })
        .collect()
}

/// Violations of a `T` payload, top-level fields in `T`'s declared order
/// and named as `T` reads them from the wire
pub fn violations_for<T: DeserializeOwned>(errors: &ValidationErrors) -> Vec<Violation> {
    violations_from(errors, declared_fields::<T>())
}

/// Flatten a `validator` error tree.
///
/// `field_order` lists the payload's wire names in declaration order. A
/// top-level key matches an entry exactly or, failing that, after case and
/// separator folding (`zeta_field` matches `zetaField`), and is reported
/// under the matched wire name. Unmatched keys come after, in lexical order.
/// Top-level struct errors become global violations; nested ones are
/// attached to the nested field's path.
pub fn violations_from(errors: &ValidationErrors, field_order: &[&str]) -> Vec<Violation> {
    let mut entries: Vec<(Option<usize>, &str, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(key, kind)| {
            let key: &str = key.as_ref();
            let position = if key == STRUCT_LEVEL_KEY {
                None
            } else {
                declared_position(key, field_order)
            };
            (position, key, kind)
        })
        .collect();
    entries.sort_by(|a, b| {
        a.0.unwrap_or(usize::MAX)
            .cmp(&b.0.unwrap_or(usize::MAX))
            .then_with(|| a.1.cmp(b.1))
    });

    let mut violations = Vec::new();
    for (position, key, kind) in entries {
        match (key, kind) {
            (STRUCT_LEVEL_KEY, ValidationErrorsKind::Field(struct_errors)) => violations.extend(
                struct_errors
                    .iter()
                    .map(|error| Violation::global(describe(error))),
            ),
            _ => {
                let path = position.map_or(key, |index| field_order[index]);
                collect(path.to_string(), kind, &mut violations);
            }
        }
    }
    violations
}

/// Index of the wire name `key` is read from
fn declared_position(key: &str, field_order: &[&str]) -> Option<usize> {
    field_order.iter().position(|field| *field == key).or_else(|| {
        let folded = fold_case(key);
        field_order
            .iter()
            .position(|field| fold_case(field) == folded)
    })
}

fn fold_case(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn collect(path: String, kind: &ValidationErrorsKind, out: &mut Vec<Violation>) {
    match kind {
        ValidationErrorsKind::Field(field_errors) => {
            for error in field_errors {
                out.push(Violation::field(
                    path.clone(),
                    error.params.get("value").cloned(),
                    describe(error),
                ));
            }
        }
        ValidationErrorsKind::Struct(nested) => collect_nested(&path, nested, out),
        ValidationErrorsKind::List(items) => {
            for (index, nested) in items {
                collect_nested(&format!("{path}[{index}]"), nested, out);
            }
        }
    }
}

fn collect_nested(prefix: &str, errors: &ValidationErrors, out: &mut Vec<Violation>) {
    let mut entries: Vec<(&str, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(key, kind)| (key.as_ref(), kind))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, kind) in entries {
        let path = if key == STRUCT_LEVEL_KEY {
            prefix.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        collect(path, kind, out);
    }
}

/// Human-readable reason for one constraint failure: the constraint's own
/// message when it has one, otherwise a description built from its code
/// and parameters.
pub fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(display_value);

    match error.code.as_ref() {
        "length" => match (param("equal"), param("min"), param("max")) {
            (Some(equal), _, _) => format!("length must be exactly {equal}"),
            (None, Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (None, Some(min), None) => format!("length must be at least {min}"),
            (None, None, Some(max)) => format!("length must be at most {max}"),
            _ => "length is invalid".to_string(),
        },
        "range" => match (
            param("min").or_else(|| param("exclusive_min")),
            param("max").or_else(|| param("exclusive_max")),
        ) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) if param("exclusive_min").is_some() => {
                format!("must be greater than {min}")
            }
            (Some(min), None) => format!("must be greater than or equal to {min}"),
            (None, Some(max)) if param("exclusive_max").is_some() => {
                format!("must be less than {max}")
            }
            (None, Some(max)) => format!("must be less than or equal to {max}"),
            (None, None) => "is out of range".to_string(),
        },
        "required" => "must not be null".to_string(),
        "email" => "must be a well-formed email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "regex" => "must match the expected pattern".to_string(),
        "credit_card" => "must be a valid credit card number".to_string(),
        "must_match" => match param("other") {
            Some(other) => format!("must match {other}"),
            None => "must match".to_string(),
        },
        "contains" => match param("needle") {
            Some(needle) => format!("must contain {needle}"),
            None => "is missing a required value".to_string(),
        },
        "does_not_contain" => match param("needle") {
            Some(needle) => format!("must not contain {needle}"),
            None => "contains a forbidden value".to_string(),
        },
        code => code.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field names `T` declares to serde, in declaration order.
///
/// Empty for types that do not deserialize as a plain struct.
pub fn declared_fields<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut fields = None;
    let _ = T::deserialize(FieldNamesProbe {
        fields: &mut fields,
    });
    fields.unwrap_or(&[])
}

/// Deserializer that records the field list serde hands to
/// `deserialize_struct` and then aborts.
struct FieldNamesProbe<'a> {
    fields: &'a mut Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for FieldNamesProbe<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.fields = Some(fields);
        Err(de::Error::custom("field names captured"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}
