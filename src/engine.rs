//! Engine Facade: owns variables, rules, and evidence; exposes
//! `compile`/`predict`/`get_variable_value`/iteration.
//!
//! A plain owned struct, `new`/`with_name` constructors, a
//! `optimization_config()`/`set_optimization_config()` pair, and a pipeline of
//! parse → convert → schedule → predict stages.

use std::collections::HashMap;

use tracing::debug;

use crate::config::SchedulerConfig;
use crate::converter;
use crate::error::{EngineError, EngineResult};
use crate::inference::InferenceResult;
use crate::parser::parse_expr;
use crate::scheduler;
use crate::state_vector::StateVector;
use crate::ternary::Ternary;
use crate::trace::CompilationTrace;
use crate::ast::Expr;

/// One stored rule: its source text, parsed AST, and converted StateVector.
#[derive(Debug, Clone)]
struct Rule {
    source: String,
    #[allow(dead_code)] // kept for introspection/debugging, not read by the core algebra
    ast: Expr,
    state_vector: StateVector,
}

/// A propositional knowledge base over a fixed set of variables.
#[derive(Debug, Clone)]
pub struct Engine {
    variables: Vec<String>,
    name: Option<String>,
    rules: Vec<Rule>,
    evidence: Vec<StateVector>,
    valid_set: Option<StateVector>,
    scheduler_config: SchedulerConfig,
    verbose: bool,
}

impl Engine {
    /// Declare the fixed variable set. Fails with `DuplicateVariable` if any
    /// name repeats.
    pub fn new(variables: Vec<String>) -> EngineResult<Self> {
        Self::with_name(variables, None, false)
    }

    /// Like `new`, additionally giving the engine a display name and
    /// setting its initial verbosity.
    pub fn with_name(variables: Vec<String>, name: Option<String>, verbose: bool) -> EngineResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(variables.len());
        for v in &variables {
            if !seen.insert(v.clone()) {
                return Err(EngineError::DuplicateVariable(v.clone()));
            }
        }
        Ok(Engine {
            variables,
            name,
            rules: Vec::new(),
            evidence: Vec::new(),
            valid_set: None,
            scheduler_config: SchedulerConfig::default(),
            verbose,
        })
    }

    /// The engine's display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared variable order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of rules added so far.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Number of evidence StateVectors added so far (one per `add_evidence` call).
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }

    /// Whether the scheduler emits `tracing` progress records.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Toggle scheduler verbosity.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Current scheduler tuning (`max_predator_size`, `max_cluster_size`).
    pub fn optimization_config(&self) -> SchedulerConfig {
        self.scheduler_config
    }

    /// Replace the scheduler tuning. Does not by itself invalidate a
    /// previously-compiled `valid_set` — call `compile()` again to apply it.
    pub fn set_optimization_config(&mut self, config: SchedulerConfig) {
        self.scheduler_config = config;
    }

    /// `true` once `compile()` has been called and not since invalidated.
    pub fn is_compiled(&self) -> bool {
        self.valid_set.is_some()
    }

    /// Parse and convert a rule string, storing it.
    /// Adding a rule after compilation invalidates the compiled `valid_set`.
    pub fn add_rule(&mut self, rule_string: &str) -> EngineResult<()> {
        let ast = parse_expr(rule_string)?;
        let state_vector = converter::convert(&ast, &self.variables)?;
        self.rules.push(Rule {
            source: rule_string.to_string(),
            ast,
            state_vector,
        });
        self.valid_set = None;
        Ok(())
    }

    /// Source strings of every rule added so far, in insertion order.
    pub fn rule_sources(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.source.as_str()).collect()
    }

    /// Pin a set of variables to boolean values, building a single-TObject
    /// StateVector. Fails with `UnknownVariable` for
    /// undeclared names, or `ConflictingEvidence` if the same name is given
    /// two different values within this call.
    pub fn add_evidence<'a>(&mut self, assignments: impl IntoIterator<Item = (&'a str, bool)>) -> EngineResult<()> {
        let sv = self.build_evidence_vector(assignments)?;
        self.evidence.push(sv);
        self.valid_set = None;
        Ok(())
    }

    fn build_evidence_vector<'a>(
        &self,
        assignments: impl IntoIterator<Item = (&'a str, bool)>,
    ) -> EngineResult<StateVector> {
        let mut seen: HashMap<&str, bool> = HashMap::new();
        for (name, value) in assignments {
            if let Some(&prev) = seen.get(name) {
                if prev != value {
                    return Err(EngineError::ConflictingEvidence {
                        name: name.to_string(),
                        first: prev,
                        second: value,
                    });
                }
            }
            seen.insert(name, value);
        }

        let mut t = crate::tobject::TObject::all_dont_care(self.variables.len());
        for (name, value) in seen {
            let idx = self
                .variables
                .iter()
                .position(|v| v == name)
                .ok_or_else(|| EngineError::UnknownVariable(name.to_string()))?;
            t.set(idx, Ternary::from(value));
        }
        Ok(StateVector::from_single(t))
    }

    fn all_input_vectors(&self) -> Vec<StateVector> {
        self.rules
            .iter()
            .map(|r| r.state_vector.clone())
            .chain(self.evidence.iter().cloned())
            .collect()
    }

    fn run_scheduler(&self, extra: Option<StateVector>) -> (StateVector, CompilationTrace) {
        let mut vectors = self.all_input_vectors();
        if let Some(e) = extra {
            vectors.push(e);
        }
        let mut trace = CompilationTrace::new(vectors.len());
        let verbose = self.verbose;
        let result = scheduler::compile(vectors, &self.scheduler_config, self.variables.len(), |step| {
            if verbose {
                debug!(
                    phase = ?step.phase,
                    remaining = step.remaining_count,
                    max_vector_size = step.max_vector_size,
                    "scheduler step"
                );
            }
            trace.record(step);
        });
        trace.finish(result.len());
        (result, trace)
    }

    /// Multiply all rules and evidence into one *valid set* and store it.
    /// Idempotent: recomputes from scratch every call. A contradiction
    /// latches `valid_set` to the empty StateVector rather than returning
    /// an error.
    pub fn compile(&mut self) {
        let (result, _trace) = self.run_scheduler(None);
        self.valid_set = Some(result);
    }

    /// Like `compile`, but also returns a `CompilationTrace` of every
    /// scheduler step for programmatic inspection.
    pub fn compile_with_trace(&mut self) -> (InferenceResult, CompilationTrace) {
        let (result, trace) = self.run_scheduler(None);
        self.valid_set = Some(result.clone());
        (InferenceResult::new(result, self.variables.clone()), trace)
    }

    /// Clear the compiled `valid_set` without touching rules or evidence.
    /// Rules and evidence are untouched — only the cached compilation is
    /// cleared.
    pub fn clear_compiled_state(&mut self) {
        self.valid_set = None;
    }

    /// Predict under additional evidence.
    ///
    /// If compiled, multiplies the stored `valid_set` by this evidence and
    /// simplifies. If not compiled, re-runs the full scheduler over
    /// `rules ∪ stored evidence ∪ this call's evidence` without persisting
    /// anything; this must agree with calling `compile()` first.
    pub fn predict<'a>(&self, evidence: impl IntoIterator<Item = (&'a str, bool)>) -> EngineResult<InferenceResult> {
        let evidence_vector = self.build_evidence_vector(evidence)?;
        let result = match &self.valid_set {
            Some(valid_set) => valid_set.multiply(&evidence_vector),
            None => {
                let (result, _trace) = self.run_scheduler(Some(evidence_vector));
                result
            }
        };
        Ok(InferenceResult::new(result, self.variables.clone()))
    }

    /// Consolidated value of a declared variable in the compiled valid set.
    /// Fails with `NotCompiled` if `compile()` has not been called, or
    /// `UnknownVariable` if `name` is not declared.
    pub fn get_variable_value(&self, name: &str) -> EngineResult<Ternary> {
        let valid_set = self.valid_set.as_ref().ok_or(EngineError::NotCompiled)?;
        let idx = self
            .variables
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| EngineError::UnknownVariable(name.to_string()))?;
        Ok(valid_set.get_value(idx))
    }

    /// Finite, restartable sequence over every concrete assignment covered
    /// by the compiled valid set. The position → name reverse index is
    /// exactly `self.variables`, cached for the engine's whole lifetime
    /// rather than rebuilt per call.
    pub fn valid_set_iter_dicts(&self) -> EngineResult<Vec<HashMap<String, bool>>> {
        let valid_set = self.valid_set.as_ref().ok_or(EngineError::NotCompiled)?;
        Ok(valid_set.iter_dicts(&self.variables))
    }

    /// The compiled valid set as an `InferenceResult`, if compiled.
    pub fn valid_set(&self) -> EngineResult<InferenceResult> {
        let valid_set = self.valid_set.as_ref().ok_or(EngineError::NotCompiled)?;
        Ok(InferenceResult::new(valid_set.clone(), self.variables.clone()))
    }
}
