//! Named property slots that string configuration can be bound into

use super::error::CoercionError;

/// A mutable, typed view of one property exposed for binding
#[derive(Debug)]
pub enum Property<'a> {
    Text(&'a mut String),
    OptionalText(&'a mut Option<String>),
    Flag(&'a mut bool),
    Integer(&'a mut i64),
    Number(&'a mut f64),
    OptionalNumber(&'a mut Option<f64>),
    /// Items separated by `|` or newlines
    List(&'a mut Vec<String>),
}

impl Property<'_> {
    /// Whether the slot still holds its type's default value
    pub fn is_default(&self) -> bool {
        match self {
            Property::Text(v) => v.is_empty(),
            Property::OptionalText(v) => v.is_none(),
            Property::Flag(v) => !**v,
            Property::Integer(v) => **v == 0,
            Property::Number(v) => **v == 0.0,
            Property::OptionalNumber(v) => v.is_none(),
            Property::List(v) => v.is_empty(),
        }
    }

    /// Coerce `raw` to the slot type and store it.
    ///
    /// On error the slot keeps its previous value.
    pub fn assign(self, raw: &str) -> Result<(), CoercionError> {
        match self {
            Property::Text(slot) => *slot = raw.to_string(),
            Property::OptionalText(slot) => *slot = Some(raw.to_string()),
            Property::Flag(slot) => *slot = parse_flag(raw)?,
            Property::Integer(slot) => {
                *slot = raw
                    .trim()
                    .parse()
                    .map_err(|_| CoercionError::Integer(raw.to_string()))?
            }
            Property::Number(slot) => *slot = parse_number(raw)?,
            Property::OptionalNumber(slot) => *slot = Some(parse_number(raw)?),
            Property::List(slot) => {
                *slot = raw
                    .split(['|', '\n'])
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            }
        }
        Ok(())
    }
}

/// Something that exposes named property slots.
///
/// `name` is always a key produced by [`normalize_key`].
pub trait Configurable {
    fn property(&mut self, name: &str) -> Option<Property<'_>>;
}

/// Lower-cases a configuration key and drops `_`, `-` and spaces, so
/// `ShowLegend`, `show_legend` and `show-legend` address the same slot.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn parse_flag(raw: &str) -> Result<bool, CoercionError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CoercionError::Flag(raw.to_string())),
    }
}

fn parse_number(raw: &str) -> Result<f64, CoercionError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CoercionError::Number(raw.to_string()))
}
