use std::sync::Arc;

use async_trait::async_trait;

use super::{Recipe, RecipeError};
use crate::{config::FeeConfig, models::StepInput, step::Step};

/// A recipe composed from explicit steps.
pub struct StepRecipe {
    name: String,
    description: String,
    fee_config: Arc<FeeConfig>,
    steps: Vec<Arc<dyn Step>>,
}

impl StepRecipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        fee_config: Arc<FeeConfig>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), fee_config, steps: Vec::new() }
    }

    pub fn add_step(&mut self, step: Arc<dyn Step>) -> Result<(), RecipeError> {
        if !step.can_add_step() {
            return Err(RecipeError::CannotAddStep(step.name().to_string()));
        }
        self.steps.push(step);
        Ok(())
    }

    /// Adds all `steps` or none of them.
    pub fn add_steps(&mut self, steps: Vec<Arc<dyn Step>>) -> Result<(), RecipeError> {
        if let Some(step) = steps.iter().find(|step| !step.can_add_step()) {
            return Err(RecipeError::CannotAddStep(step.name().to_string()));
        }
        self.steps.extend(steps);
        Ok(())
    }
}

#[async_trait]
impl Recipe for StepRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fee_config(&self) -> &Arc<FeeConfig> {
        &self.fee_config
    }

    async fn get_internal_steps(
        &self,
        _first_internal_input: &StepInput,
    ) -> Result<Vec<Arc<dyn Step>>, RecipeError> {
        Ok(self.steps.clone())
    }
}
