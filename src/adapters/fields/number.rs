use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::control::{FieldControl, HasRequired, Initialize, ProducesResult, SetFromQuery};
use crate::domain::property::{Configurable, Property};
use crate::domain::ControlResult;

/// Numeric input. The value is stored as text in canonical form: parsed,
/// clamped into range and reformatted, so `"007"` becomes `"7"`.
#[derive(Debug, Clone, Serialize)]
pub struct NumberField {
    pub label: String,
    pub value: Option<String>,
    pub is_required: bool,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub step: f64,
}

impl Default for NumberField {
    fn default() -> Self {
        Self {
            label: String::new(),
            value: None,
            is_required: false,
            minimum: None,
            maximum: None,
            step: 1.0,
        }
    }
}

impl NumberField {
    /// Parse `raw` and clamp it into `[minimum, maximum]`.
    fn normalize(&self, raw: &str) -> Option<String> {
        let mut number: f64 = raw.trim().parse().ok().filter(|n: &f64| n.is_finite())?;
        if let Some(min) = self.minimum {
            number = number.max(min);
        }
        if let Some(max) = self.maximum {
            number = number.min(max);
        }
        Some(format_number(number))
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl Configurable for NumberField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "value" => Property::OptionalText(&mut self.value),
            "isrequired" => Property::Flag(&mut self.is_required),
            "minimum" | "min" => Property::OptionalNumber(&mut self.minimum),
            "maximum" | "max" => Property::OptionalNumber(&mut self.maximum),
            "step" => Property::Number(&mut self.step),
            _ => return None,
        })
    }
}

impl FieldControl for NumberField {
    fn kind(&self) -> &'static str {
        "number"
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

    fn as_initializer(&mut self) -> Option<&mut dyn Initialize> {
        Some(self)
    }
}

impl HasRequired for NumberField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl Initialize for NumberField {
    /// Drops a configured value that is not a number and clamps the rest.
    fn initialize(&mut self) {
        self.value = self.value.as_deref().and_then(|raw| self.normalize(raw));
    }
}

impl SetFromQuery for NumberField {
    fn set_value_from_query(&mut self, value: &str) {
        if let Some(normalized) = self.normalize(value) {
            self.value = Some(normalized);
        }
    }
}

impl ProducesResult for NumberField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(ControlResult {
            field_id,
            field_name: field_name.to_string(),
            value: self.value.clone(),
            parameters: String::new(),
            secure: false,
        })
    }
}
