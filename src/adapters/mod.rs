pub mod assembler;
pub mod field_registry;
pub mod fields;
pub mod harvester;
pub mod property_binder;
pub mod rules;
