//! Load saved scenarios (CSV) and input documents (JSON)

use super::{DetailedInputs, RevenueInputs, SimpleInputs};
use crate::error::LoadError;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw CSV row matching the saved scenario record columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    initial_mrr: f64,
    mrr_growth_rate: f64,
    project_revenue: f64,
    project_growth_rate: f64,
    churn_rate: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Scenario {
        Scenario {
            name: self.name,
            inputs: SimpleInputs {
                initial_mrr: self.initial_mrr,
                mrr_growth_rate: self.mrr_growth_rate,
                churn_rate: self.churn_rate,
                project_revenue: self.project_revenue,
                project_growth_rate: self.project_growth_rate,
            }
            .into(),
        }
    }
}

/// A named set of projection inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub inputs: RevenueInputs,
}

impl Scenario {
    pub fn new(name: impl Into<String>, inputs: impl Into<RevenueInputs>) -> Self {
        Self {
            name: name.into(),
            inputs: inputs.into(),
        }
    }
}

/// Any of the accepted JSON input shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Unified(RevenueInputs),
    Detailed(DetailedInputs),
    Simple(SimpleInputs),
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    read_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    read_scenarios(Reader::from_reader(reader))
}

fn read_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>, LoadError> {
    let mut scenarios = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let scenario = row.into_scenario();
        scenario
            .inputs
            .validate()
            .map_err(|source| LoadError::Invalid { row: idx + 1, source })?;
        scenarios.push(scenario);
    }

    Ok(scenarios)
}

/// Parse one input document in unified, detailed, or simple shape
pub fn load_inputs_json<R: std::io::Read>(reader: R) -> Result<RevenueInputs, LoadError> {
    let document: InputDocument = serde_json::from_reader(reader)?;
    let inputs = match document {
        InputDocument::Unified(inputs) => inputs,
        InputDocument::Detailed(inputs) => inputs.into(),
        InputDocument::Simple(inputs) => inputs.into(),
    };
    inputs
        .validate()
        .map_err(|source| LoadError::Invalid { row: 1, source })?;
    Ok(inputs)
}
