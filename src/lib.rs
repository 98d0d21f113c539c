//! # formview
//!
//! Turns declarative form definitions (sections and fields described by
//! weakly-typed configuration) into a typed view-model tree, and harvests
//! submitted results back out of that tree.
//!
//! ## Pipeline
//!
//! - **Field Type Registry**: resolves a field's type identifier to a
//!   factory for its presentation type
//! - **Property Binder**: pushes string configuration into whatever
//!   property slots the resolved type exposes
//! - **Rule Evaluator**: condition expressions that may hide or reshape a
//!   section or field after it is built
//! - **Result Harvester**: flattens submitted field values into result records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formview::adapters::harvester::ResultHarvester;
//! use formview::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let assembler = formview::build_assembler(&settings);
//!
//!     for mut definition in settings.load_forms()? {
//!         let view = assembler.assemble_form(&definition);
//!         let results = ResultHarvester::harvest(&view, &mut definition);
//!         println!("{}: {} results", view.name, results.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: definitions, view-models, capabilities and the rule port
//! - **Adapters**: binder, registry, built-in fields, assembler, harvester, Rhai rules
//! - **Config**: settings and definition loading

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::assembler::FormAssembler;
use crate::adapters::field_registry::FieldTypeRegistry;
use crate::adapters::rules::RhaiRuleEvaluator;
use crate::config::Settings;
use std::sync::Arc;

/// Registry with the built-in field types plus the aliases and disabled
/// types named in `settings`.
pub fn build_registry(settings: &Settings) -> FieldTypeRegistry {
    let mut registry = FieldTypeRegistry::with_builtin_fields();

    for alias in &settings.registry.aliases {
        registry.register_alias(&alias.alias, &alias.target);
    }
    for id in &settings.registry.disabled {
        tracing::info!(field_type = %id, "field type disabled by configuration");
        registry.register_abstract(id);
    }

    registry
}

/// Assembler wired with the configured registry and the Rhai rule evaluator
pub fn build_assembler(settings: &Settings) -> FormAssembler {
    let registry = Arc::new(build_registry(settings));
    let rules = Arc::new(RhaiRuleEvaluator::from_settings(&settings.rules));
    FormAssembler::new(registry, rules)
}
