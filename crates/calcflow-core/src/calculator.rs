//! Calculator: pipeline plus history

use crate::{
    config::Config,
    history::{HistoryRecord, HistoryStore, NewRecord},
    pipeline::{CalcError, Calculation, Pipeline},
};

/// Why a calculate call failed
#[derive(Debug, thiserror::Error)]
pub enum CalculatorError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Failed to save history: {0}")]
    History(anyhow::Error),
}

/// Successful calculation plus the stored record, if one was written
#[derive(Debug, Clone)]
pub struct CalculateOutput {
    pub calculation: Calculation,
    pub record: Option<HistoryRecord>,
}

/// Runs calculations and records successful ones
pub struct Calculator<S: HistoryStore> {
    pipeline: Pipeline,
    store: S,
    recent_limit: usize,
}

impl<S: HistoryStore> Calculator<S> {
    pub fn new(config: &Config, store: S) -> Self {
        Self {
            pipeline: Pipeline::new(config),
            store,
            recent_limit: config.history.recent_limit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Calculate and, if it succeeds and `save` is set, store a record for `user`.
    ///
    /// Failed calculations are never stored.
    pub fn calculate(
        &mut self,
        user: &str,
        expression: &str,
        ai_mode: bool,
        save: bool,
    ) -> Result<CalculateOutput, CalculatorError> {
        let calculation = self.pipeline.calculate(expression, ai_mode)?;

        let record = if save {
            let new = NewRecord {
                user: user.to_string(),
                expression: calculation.normalized.history_expression().to_string(),
                result: calculation.result,
                steps: calculation.steps().clone().into_strings(),
                ai_mode,
            };
            Some(self.store.insert(new).map_err(CalculatorError::History)?)
        } else {
            None
        };

        Ok(CalculateOutput { calculation, record })
    }

    /// Recent records for `user`, newest first. `None` uses the configured limit.
    pub fn history(&self, user: &str, limit: Option<usize>) -> anyhow::Result<Vec<HistoryRecord>> {
        self.store.recent(user, limit.unwrap_or(self.recent_limit))
    }

    pub fn delete(&mut self, user: &str, id: u64) -> anyhow::Result<bool> {
        self.store.delete(user, id)
    }

    pub fn clear(&mut self, user: &str) -> anyhow::Result<usize> {
        self.store.clear(user)
    }
}
