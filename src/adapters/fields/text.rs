//! Free-text controls

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::control::{FieldControl, HasRequired, ProducesResult, SetFromQuery};
use crate::domain::property::{Configurable, Property};
use crate::domain::ControlResult;

fn text_result(field_id: Uuid, field_name: &str, value: &Option<String>, secure: bool) -> ControlResult {
    ControlResult {
        field_id,
        field_name: field_name.to_string(),
        value: value.clone(),
        parameters: String::new(),
        secure,
    }
}

// ============================================================================
// Single line
// ============================================================================

#[derive(Debug, Default, Clone, Serialize)]
pub struct SingleLineTextField {
    pub label: String,
    pub value: Option<String>,
    pub is_required: bool,
    pub placeholder_text: String,
    pub min_length: i64,
    pub max_length: i64,
}

impl Configurable for SingleLineTextField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "value" => Property::OptionalText(&mut self.value),
            "isrequired" => Property::Flag(&mut self.is_required),
            "placeholdertext" => Property::Text(&mut self.placeholder_text),
            "minlength" => Property::Integer(&mut self.min_length),
            "maxlength" => Property::Integer(&mut self.max_length),
            _ => return None,
        })
    }
}

impl FieldControl for SingleLineTextField {
    fn kind(&self) -> &'static str {
        "single-line-text"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        Some(self)
    }

    fn required(&self) -> Option<&dyn HasRequired> {
        Some(self)
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }
}

impl HasRequired for SingleLineTextField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl SetFromQuery for SingleLineTextField {
    fn set_value_from_query(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

impl ProducesResult for SingleLineTextField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(text_result(field_id, field_name, &self.value, false))
    }
}

// ============================================================================
// Multiple lines
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MultipleLineTextField {
    pub label: String,
    pub value: Option<String>,
    pub is_required: bool,
    pub rows: i64,
    pub min_length: i64,
    pub max_length: i64,
}

impl Default for MultipleLineTextField {
    fn default() -> Self {
        Self {
            label: String::new(),
            value: None,
            is_required: false,
            rows: 4,
            min_length: 0,
            max_length: 0,
        }
    }
}

impl Configurable for MultipleLineTextField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "value" => Property::OptionalText(&mut self.value),
            "isrequired" => Property::Flag(&mut self.is_required),
            "rows" => Property::Integer(&mut self.rows),
            "minlength" => Property::Integer(&mut self.min_length),
            "maxlength" => Property::Integer(&mut self.max_length),
            _ => return None,
        })
    }
}

impl FieldControl for MultipleLineTextField {
    fn kind(&self) -> &'static str {
        "multiple-line-text"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        Some(self)
    }

    fn required(&self) -> Option<&dyn HasRequired> {
        Some(self)
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }
}

impl HasRequired for MultipleLineTextField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl SetFromQuery for MultipleLineTextField {
    fn set_value_from_query(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

impl ProducesResult for MultipleLineTextField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(text_result(field_id, field_name, &self.value, false))
    }
}

// ============================================================================
// Email
// ============================================================================

#[derive(Debug, Default, Clone, Serialize)]
pub struct EmailField {
    pub label: String,
    pub value: Option<String>,
    pub is_required: bool,
    pub placeholder_text: String,
}

impl Configurable for EmailField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "value" => Property::OptionalText(&mut self.value),
            "isrequired" => Property::Flag(&mut self.is_required),
            "placeholdertext" => Property::Text(&mut self.placeholder_text),
            _ => return None,
        })
    }
}

impl FieldControl for EmailField {
    fn kind(&self) -> &'static str {
        "email"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        Some(self)
    }

    fn required(&self) -> Option<&dyn HasRequired> {
        Some(self)
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }
}

impl HasRequired for EmailField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl SetFromQuery for EmailField {
    fn set_value_from_query(&mut self, value: &str) {
        self.value = Some(value.trim().to_string());
    }
}

impl ProducesResult for EmailField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(text_result(field_id, field_name, &self.value, false))
    }
}

// ============================================================================
// Password
// ============================================================================

/// Never prefilled from the query string; results are flagged secure.
#[derive(Debug, Default, Clone)]
pub struct PasswordField {
    pub label: String,
    pub value: Option<String>,
    pub is_required: bool,
    pub min_length: i64,
    pub max_length: i64,
}

impl Configurable for PasswordField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "value" => Property::OptionalText(&mut self.value),
            "isrequired" => Property::Flag(&mut self.is_required),
            "minlength" => Property::Integer(&mut self.min_length),
            "maxlength" => Property::Integer(&mut self.max_length),
            _ => return None,
        })
    }
}

impl FieldControl for PasswordField {
    fn kind(&self) -> &'static str {
        "password"
    }

    // value is never exposed
    fn state(&self) -> Value {
        serde_json::json!({
            "label": self.label,
            "is_required": self.is_required,
            "min_length": self.min_length,
            "max_length": self.max_length,
        })
    }

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        Some(self)
    }

    fn required(&self) -> Option<&dyn HasRequired> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }
}

impl HasRequired for PasswordField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl ProducesResult for PasswordField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(text_result(field_id, field_name, &self.value, true))
    }
}
