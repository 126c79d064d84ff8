//! Compilation scheduler: orders pairwise multiplication of many
//! StateVectors to bound intermediate blow-up.
//!
//! Phase 1 (predator-prey): small vectors shrink larger ones without
//! growing them. Phase 2 (Jaccard clustering): remaining vectors are paired
//! by variable-support overlap, which tends to produce immediate
//! simplification rather than combinatorial blow-up.

use std::collections::BTreeSet;

use crate::config::SchedulerConfig;
use crate::state_vector::StateVector;
use crate::trace::{Phase, SchedulerStep};

/// Multiply every StateVector in `vectors` into one, using the two-phase
/// heuristic schedule. `n` is the declared variable count, used to build
/// the tautological identity when `vectors` is empty. `on_step` is called
/// after every scheduler step with a `(remaining_count, max_vector_size)`
/// progress record; pass a no-op closure to run silently.
pub fn compile(
    vectors: Vec<StateVector>,
    config: &SchedulerConfig,
    n: usize,
    mut on_step: impl FnMut(SchedulerStep),
) -> StateVector {
    if vectors.is_empty() {
        return StateVector::tautology(n);
    }

    let mut working: Vec<StateVector> = vectors;

    // Phase 1: predator-prey reduction.
    loop {
        if working.len() <= 1 {
            break;
        }
        let (min_idx, min_len) = working
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.len()))
            .min_by_key(|&(_, len)| len)
            .expect("working set is non-empty");
        if min_len > config.max_predator_size {
            break;
        }

        let predator = working.remove(min_idx);
        let mut contradiction = false;
        let mut folded_in = false;
        for prey in working.iter_mut() {
            if prey.len() > predator.len() {
                let reduced = prey.multiply(&predator);
                if reduced.is_empty() {
                    contradiction = true;
                }
                *prey = reduced;
                folded_in = true;
            }
        }
        // No remaining vector was strictly larger (e.g. several smallest
        // vectors tied in size) — fold the predator into the first
        // remaining vector instead of discarding its constraints, since
        // every input must still appear in the final product.
        if !folded_in {
            let reduced = working[0].multiply(&predator);
            if reduced.is_empty() {
                contradiction = true;
            }
            working[0] = reduced;
        }
        if contradiction {
            return StateVector::empty(n);
        }

        let max_size = working.iter().map(StateVector::len).max().unwrap_or(0);
        on_step(SchedulerStep {
            phase: Phase::PredatorPrey,
            remaining_count: working.len(),
            max_vector_size: max_size,
        });
    }

    // Phase 2: Jaccard-similarity clustering.
    loop {
        if working.len() <= 1 {
            break;
        }

        let defs: Vec<BTreeSet<usize>> = working.iter().map(def_positions).collect();
        let mut candidates: Vec<(usize, usize, f64, usize, Vec<usize>)> = Vec::new();
        for i in 0..working.len() {
            for j in (i + 1)..working.len() {
                let sim = jaccard(&defs[i], &defs[j]);
                let combined_size = working[i].len() + working[j].len();
                let support: Vec<usize> = defs[i].union(&defs[j]).copied().collect();
                candidates.push((i, j, sim, combined_size, support));
            }
        }
        // Best first: highest similarity, then smaller combined size, then
        // lexicographically-lowest support, for deterministic tie-breaks.
        candidates.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.3.cmp(&b.3))
                .then(a.4.cmp(&b.4))
        });

        let mut merged_any = false;
        for (i, j, _sim, _combined, _support) in candidates {
            let merged = working[i].multiply(&working[j]);
            if merged.len() > config.max_cluster_size {
                continue; // exceeds cap — skip and try the next-best pair
            }
            let is_empty = merged.is_empty();
            // Remove j first (larger index) so i's index stays valid.
            working.remove(j);
            working.remove(i);
            working.push(merged);
            merged_any = true;

            if is_empty {
                return StateVector::empty(n);
            }

            let max_size = working.iter().map(StateVector::len).max().unwrap_or(0);
            on_step(SchedulerStep {
                phase: Phase::JaccardClustering,
                remaining_count: working.len(),
                max_vector_size: max_size,
            });
            break;
        }

        if !merged_any {
            break; // no pair respects the cluster cap — nothing more to do
        }
    }

    // Any vectors left unmerged (only possible if every remaining pair
    // exceeded max_cluster_size) are folded in with a final plain multiply;
    // this always terminates because a two-element working set with no
    // admissible cap-respecting merge still has a correct, if larger,
    // product.
    let mut result = working.remove(0);
    for v in working {
        result = result.multiply(&v);
        if result.is_empty() {
            return StateVector::empty(n);
        }
    }
    result
}

fn def_positions(sv: &StateVector) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();
    for obj in sv.iter() {
        set.extend(obj.defined_mask().ones());
    }
    set
}

fn jaccard(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> f64 {
    let inter = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}
