//! Scenario runner for batch projections and the caller-owned calculator session
//!
//! The engine is stateless, so a batch is just many independent calls sharing
//! one config. `Calculator` keeps the latest inputs and result for callers
//! that recompute on every edit.

use crate::error::InputError;
use crate::inputs::{RevenueInputs, Scenario, SimpleInputs};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use rayon::prelude::*;

/// Projection outcome for one named scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult, InputError>,
}

/// Runs many scenarios with one configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionConfig::default());
/// for outcome in runner.run_batch(&load_scenarios("scenarios.csv")?) {
///     println!("{}: {:?}", outcome.name, outcome.result.map(|r| r.metrics.projected_arr));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &RevenueInputs) -> Result<ProjectionResult, InputError> {
        self.engine.project(inputs)
    }

    /// Run all scenarios in parallel, results in input order
    ///
    /// The label anchor is resolved once so every scenario shares it.
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let config = ProjectionConfig {
            as_of: Some(self.engine.config().anchor_date()),
            ..self.engine.config().clone()
        };
        let engine = ProjectionEngine::new(config);

        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: engine.project(&scenario.inputs),
            })
            .collect()
    }
}

/// Explicit recompute-on-change session
///
/// Every mutation recomputes immediately, so `result` always reflects the
/// current inputs. A failed recompute clears the previous result.
#[derive(Debug, Clone)]
pub struct Calculator {
    engine: ProjectionEngine,
    inputs: RevenueInputs,
    scenario_name: Option<String>,
    result: Result<ProjectionResult, InputError>,
}

impl Calculator {
    /// Start from the default simple-profile scenario
    pub fn new(config: ProjectionConfig) -> Self {
        let engine = ProjectionEngine::new(config);
        let inputs: RevenueInputs = SimpleInputs::default().into();
        let result = engine.project(&inputs);
        Self {
            engine,
            inputs,
            scenario_name: None,
            result,
        }
    }

    pub fn inputs(&self) -> &RevenueInputs {
        &self.inputs
    }

    pub fn scenario_name(&self) -> Option<&str> {
        self.scenario_name.as_deref()
    }

    /// Latest projection, or the validation failure for the current inputs
    pub fn result(&self) -> Result<&ProjectionResult, &InputError> {
        self.result.as_ref()
    }

    /// Replace the inputs and recompute
    pub fn set_inputs(&mut self, inputs: impl Into<RevenueInputs>) -> Result<&ProjectionResult, &InputError> {
        self.inputs = inputs.into();
        self.recalculate()
    }

    /// Edit the current inputs in place and recompute
    pub fn update<F>(&mut self, edit: F) -> Result<&ProjectionResult, &InputError>
    where
        F: FnOnce(&mut RevenueInputs),
    {
        edit(&mut self.inputs);
        self.recalculate()
    }

    /// Load a saved scenario and recompute
    pub fn load_scenario(&mut self, scenario: Scenario) -> Result<&ProjectionResult, &InputError> {
        self.scenario_name = Some(scenario.name);
        self.inputs = scenario.inputs;
        self.recalculate()
    }

    /// Back to the default scenario
    pub fn reset(&mut self) -> Result<&ProjectionResult, &InputError> {
        self.scenario_name = None;
        self.inputs = SimpleInputs::default().into();
        self.recalculate()
    }

    fn recalculate(&mut self) -> Result<&ProjectionResult, &InputError> {
        self.result = self.engine.project(&self.inputs);
        if let Err(err) = &self.result {
            log::debug!("recompute rejected: {}", err);
        }
        self.result.as_ref()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
