use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name used for cross-field (whole object) violations
pub const GLOBAL_FIELD: &str = "global";

/// One validation diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<Value>,
    pub reason: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        rejected_value: Option<Value>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rejected_value,
            reason: reason.into(),
        }
    }

    /// Violation that is not attributable to a single field
    pub fn global(reason: impl Into<String>) -> Self {
        Self {
            field: GLOBAL_FIELD.to_string(),
            rejected_value: None,
            reason: reason.into(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.field == GLOBAL_FIELD && self.rejected_value.is_none()
    }
}

/// A violation as reported by a validation engine, before normalization.
///
/// The order of a `Vec<Violation>` is the engine's order and is preserved by
/// [`crate::application::diagnostics::extract`].
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Violation of a constraint on one named input
    Field {
        field: String,
        rejected_value: Option<Value>,
        description: String,
    },
    /// Cross-field or whole-object violation
    Global { description: String },
}

impl Violation {
    pub fn field(
        field: impl Into<String>,
        rejected_value: Option<Value>,
        description: impl Into<String>,
    ) -> Self {
        Violation::Field {
            field: field.into(),
            rejected_value,
            description: description.into(),
        }
    }

    pub fn global(description: impl Into<String>) -> Self {
        Violation::Global {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Violation::Field { description, .. } | Violation::Global { description } => {
                description
            }
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Violation::Global { .. })
    }
}
