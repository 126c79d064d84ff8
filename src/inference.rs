//! `InferenceResult`: a thin wrapper over the StateVector returned by
//! `Engine::predict` and `Engine::compile_with_trace`.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::state_vector::StateVector;
use crate::ternary::Ternary;

/// The result of a prediction or compilation: a StateVector paired with the
/// variable names needed to make `get_value`/`iter_dicts` usable without
/// the caller re-supplying the declared order. Empty iff the evidence
/// contradicted the knowledge base.
#[derive(Debug, Clone)]
pub struct InferenceResult {
    state_vector: StateVector,
    variables: Vec<String>,
}

impl InferenceResult {
    pub(crate) fn new(state_vector: StateVector, variables: Vec<String>) -> Self {
        InferenceResult { state_vector, variables }
    }

    /// `true` iff this result represents a contradiction (empty StateVector).
    pub fn is_empty(&self) -> bool {
        self.state_vector.is_empty()
    }

    /// Number of member TObjects in the underlying StateVector.
    pub fn len(&self) -> usize {
        self.state_vector.len()
    }

    /// The underlying StateVector, for callers that want the raw algebra.
    pub fn state_vector(&self) -> &StateVector {
        &self.state_vector
    }

    /// Consolidated value of a declared variable across this result.
    pub fn get_value(&self, name: &str) -> EngineResult<Ternary> {
        let idx = self
            .variables
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| EngineError::UnknownVariable(name.to_string()))?;
        Ok(self.state_vector.get_value(idx))
    }

    /// Every concrete assignment covered by this result, as `name -> bool`
    /// maps. Finite and restartable.
    pub fn iter_dicts(&self) -> Vec<HashMap<String, bool>> {
        self.state_vector.iter_dicts(&self.variables)
    }
}
