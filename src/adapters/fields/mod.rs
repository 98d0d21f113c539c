//! Built-in presentation types

pub mod choice;
pub mod literal;
pub mod number;
pub mod text;

pub use choice::{CheckboxField, DropListField};
pub use literal::LiteralTextField;
pub use number::NumberField;
pub use text::{EmailField, MultipleLineTextField, PasswordField, SingleLineTextField};

use super::field_registry::FieldTypeRegistry;

pub fn register_builtin_fields(registry: &mut FieldTypeRegistry) {
    registry
        .register_default::<SingleLineTextField>("single-line-text")
        .register_default::<MultipleLineTextField>("multiple-line-text")
        .register_default::<EmailField>("email")
        .register_default::<PasswordField>("password")
        .register_default::<NumberField>("number")
        .register_default::<CheckboxField>("checkbox")
        .register_default::<DropListField>("drop-list")
        .register_default::<LiteralTextField>("literal-text");
}
