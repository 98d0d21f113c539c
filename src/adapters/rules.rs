//! Rhai-backed rule evaluator
//!
//! A condition expression runs against a scope built from the subject:
//! - `visible`: current visibility; scripts may reassign it
//! - `node`: read-only snapshot of the subject
//! - `params`: the subject's merged configuration
//! - `props`: empty map; entries written here are bound back onto the subject
//! - any host globals (for example `query`)
//!
//! Afterwards `visible` is written back, `props` are bound (so
//! `props.Visible` can hide the node), and an expression that evaluates to a
//! boolean has the final say on visibility.

use rhai::{Dynamic, Engine, Map, Scope};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::adapters::property_binder::PropertyBinder;
use crate::config::RuleSettings;
use crate::domain::{Parameters, RuleEvaluator, RuleSubject};

pub struct RhaiRuleEvaluator {
    engine: Engine,
    globals: BTreeMap<String, Value>,
}

impl RhaiRuleEvaluator {
    pub fn new() -> Self {
        Self::from_settings(&RuleSettings::default())
    }

    pub fn from_settings(settings: &RuleSettings) -> Self {
        let mut engine = Engine::new();
        engine.set_max_expr_depths(settings.max_expr_depth, settings.max_expr_depth);
        engine.set_max_operations(settings.max_operations);

        let globals = settings
            .globals
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        Self { engine, globals }
    }

    /// Expose an extra variable to every expression
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    fn scope_for(&self, subject: &dyn RuleSubject) -> Scope<'static> {
        let mut scope = Scope::new();
        for (name, value) in &self.globals {
            scope.push_dynamic(name.clone(), to_dynamic(value));
        }

        let node = subject.rule_scope();
        let params = node.get("parameters").cloned().unwrap_or(Value::Null);
        scope.push("visible", subject.is_visible());
        scope.push_dynamic("node", to_dynamic(&node));
        scope.push_dynamic("params", to_dynamic(&params));
        scope.push("props", Map::new());
        scope
    }
}

impl Default for RhaiRuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEvaluator for RhaiRuleEvaluator {
    fn run_rules(&self, expression: &str, subject: &mut dyn RuleSubject) {
        let mut scope = self.scope_for(subject);

        let result = match self.engine.eval_with_scope::<Dynamic>(&mut scope, expression) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(expression = %expression, "rule evaluation failed: {}", e);
                return;
            }
        };

        // Precedence: scope `visible`, then `props`, then a boolean result
        if let Some(visible) = scope.get_value::<bool>("visible") {
            subject.set_visible(visible);
        }

        if let Some(props) = scope.get_value::<Map>("props") {
            let changes: Parameters = props
                .into_iter()
                .map(|(key, value)| (key.to_string(), dynamic_to_text(value)))
                .collect();
            if !changes.is_empty() {
                PropertyBinder::bind(subject.as_configurable(), &changes, true);
            }
        }

        if let Ok(visible) = result.as_bool() {
            subject.set_visible(visible);
        }
    }
}

fn to_dynamic(value: &Value) -> Dynamic {
    rhai::serde::to_dynamic(value).unwrap_or(Dynamic::UNIT)
}

fn dynamic_to_text(value: Dynamic) -> String {
    if value.is_string() {
        value.into_string().unwrap_or_default()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
