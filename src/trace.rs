//! Compilation trace: a structured record of scheduler progress.
//!
//! A plain struct a caller can inspect after the fact, alongside (not
//! instead of) live `tracing` output emitted by the scheduler's verbosity
//! hook.

/// One scheduler step: a `(remaining_count, max_vector_size)` progress
/// record, tagged with which phase produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStep {
    /// Which scheduler phase this step belongs to.
    pub phase: Phase,
    /// Number of StateVectors still in the working set after this step.
    pub remaining_count: usize,
    /// Largest StateVector (by member count) in the working set after this step.
    pub max_vector_size: usize,
}

/// Compilation scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Phase 1: predator-prey reduction.
    PredatorPrey,
    /// Phase 2: Jaccard-similarity clustering.
    JaccardClustering,
}

/// A full record of one scheduler run, for programmatic inspection
/// (`Engine::compile_with_trace`).
#[derive(Debug, Clone, Default)]
pub struct CompilationTrace {
    /// Every step recorded during this run, in order.
    pub steps: Vec<SchedulerStep>,
    /// Number of input StateVectors (rules + evidence) before scheduling.
    pub input_count: usize,
    /// Size of the final, simplified valid set.
    pub output_size: usize,
}

impl CompilationTrace {
    pub(crate) fn new(input_count: usize) -> Self {
        CompilationTrace {
            steps: Vec::new(),
            input_count,
            output_size: 0,
        }
    }

    pub(crate) fn record(&mut self, step: SchedulerStep) {
        self.steps.push(step);
    }

    pub(crate) fn finish(&mut self, output_size: usize) {
        self.output_size = output_size;
    }

    /// The largest intermediate StateVector seen across the whole run —
    /// useful for judging whether the heuristics kept the blow-up in check.
    pub fn peak_vector_size(&self) -> usize {
        self.steps.iter().map(|s| s.max_vector_size).max().unwrap_or(0)
    }
}
