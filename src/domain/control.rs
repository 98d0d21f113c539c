//! Presentation types and the capabilities they may declare

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use super::property::Configurable;
use super::ControlResult;

/// A concrete presentation type resolved from a field's type identifier.
///
/// Capabilities are opt-in: each accessor returns `None` unless the
/// implementing type overrides it.
pub trait FieldControl: Configurable + fmt::Debug + Send + Sync {
    /// Registered identifier of this control
    fn kind(&self) -> &'static str;

    /// Snapshot of the control's state for rendering and rule scopes
    fn state(&self) -> Value;

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        None
    }

    /// Read-only view of the same capability as [`FieldControl::as_required`]
    fn required(&self) -> Option<&dyn HasRequired> {
        None
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        None
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        None
    }

    fn as_initializer(&mut self) -> Option<&mut dyn Initialize> {
        None
    }
}

pub trait HasRequired {
    fn is_required(&self) -> bool;
    fn set_required(&mut self, required: bool);
}

/// Accepts a prefill value taken from the request query string
pub trait SetFromQuery {
    fn set_value_from_query(&mut self, value: &str);
}

pub trait ProducesResult {
    /// Build the submission record for this control, if it has anything to report
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult>;
}

/// Post-construction hook, run once configuration has been bound
pub trait Initialize {
    fn initialize(&mut self);
}
