//! Result Harvester - collects submitted values from an assembled tree

use crate::domain::{ControlResult, FormDefinition, FormViewModel};

pub struct ResultHarvester;

impl ResultHarvester {
    /// One record per result-producing field, in section then field order.
    /// Absent values come back as empty strings.
    pub fn collect(view: &FormViewModel) -> Vec<ControlResult> {
        view.fields()
            .filter_map(|field| field.result())
            .map(|mut result| {
                result.value.get_or_insert_with(String::new);
                result
            })
            .collect()
    }

    /// Collect results and store them in the definition's results slot.
    pub fn harvest(view: &FormViewModel, definition: &mut FormDefinition) -> Vec<ControlResult> {
        let results = Self::collect(view);
        tracing::debug!(form = %view.unique_id, results = results.len(), "harvested form results");
        definition.results = results.clone();
        results
    }
}

#[cfg(test)]
#[path = "harvester_test.rs"]
mod tests;
