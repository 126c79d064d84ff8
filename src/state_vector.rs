//! `StateVector`: a disjunction of [`TObject`]s, with multiplication and
//! adjacency-reduction simplification.

use std::collections::HashMap;

use crate::ternary::Ternary;
use crate::tobject::TObject;

/// A set of `TObject`s over the same `n` variables. Semantically the union
/// of the assignments its members cover.
#[derive(Debug, Clone)]
pub struct StateVector {
    n: usize,
    objects: Vec<TObject>,
}

impl StateVector {
    /// An empty StateVector (⊥ / contradiction) over `n` variables.
    pub fn empty(n: usize) -> Self {
        StateVector { n, objects: Vec::new() }
    }

    /// The tautological StateVector (⊤): a single all-X TObject.
    pub fn tautology(n: usize) -> Self {
        StateVector {
            n,
            objects: vec![TObject::all_dont_care(n)],
        }
    }

    /// Build from a single TObject.
    pub fn from_single(t: TObject) -> Self {
        let n = t.len();
        StateVector { n, objects: vec![t] }
    }

    /// Number of declared variables.
    pub fn arity(&self) -> usize {
        self.n
    }

    /// Add a TObject (construction-time).
    pub fn push(&mut self, t: TObject) {
        debug_assert_eq!(t.len(), self.n);
        self.objects.push(t);
    }

    /// Number of member TObjects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` iff this StateVector represents ⊥ (the empty disjunction).
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over member TObjects.
    pub fn iter(&self) -> impl Iterator<Item = &TObject> {
        self.objects.iter()
    }

    /// Indexed access to a member TObject.
    pub fn get(&self, index: usize) -> Option<&TObject> {
        self.objects.get(index)
    }

    /// Reduce to canonical reduced form: repeat covering elimination and
    /// adjacency merging until a pass makes no change. Idempotent.
    pub fn simplify(&mut self) {
        loop {
            let changed_cover = self.eliminate_covered();
            let changed_merge = self.merge_adjacent();
            if !changed_cover && !changed_merge {
                break;
            }
        }
    }

    /// Covering elimination: remove any TObject covered by another
    /// (strict-or-equal; ties keep the first encountered).
    fn eliminate_covered(&mut self) -> bool {
        let n = self.objects.len();
        let mut keep = vec![true; n];
        for i in 0..n {
            if !keep[i] {
                continue;
            }
            for j in 0..n {
                if i == j || !keep[j] {
                    continue;
                }
                // self.objects[j] covers self.objects[i]: drop i, unless it
                // would also be dropped by an earlier survivor (tie-break:
                // keep the first encountered index).
                if self.objects[j].covers(&self.objects[i]) && (j < i || !self.objects[i].covers(&self.objects[j])) {
                    keep[i] = false;
                    break;
                }
            }
        }
        let before = self.objects.len();
        let mut kept = Vec::with_capacity(before);
        for (idx, obj) in std::mem::take(&mut self.objects).into_iter().enumerate() {
            if keep[idx] {
                kept.push(obj);
            }
        }
        let changed = kept.len() != before;
        self.objects = kept;
        changed
    }

    /// Adjacency merge pass, grouped by `defined` mask: within a mask group,
    /// for each defined position, bucket members by their values at every
    /// *other* defined position; any bucket with both a true-at-`pos` and a
    /// false-at-`pos` member yields a mergeable pair. Avoids the O(k²)
    /// pairwise scan that a naive adjacency search would require.
    fn merge_adjacent(&mut self) -> bool {
        let mut groups: HashMap<Vec<usize>, Vec<TObject>> = HashMap::new();
        for obj in std::mem::take(&mut self.objects) {
            let key: Vec<usize> = obj.defined_mask().ones().collect();
            groups.entry(key).or_default().push(obj);
        }

        let mut changed = false;
        let mut result = Vec::new();

        for (mask_key, group) in groups {
            if group.len() < 2 {
                result.extend(group);
                continue;
            }

            let mut consumed = vec![false; group.len()];
            let mut produced = Vec::new();

            for &pos in &mask_key {
                let others: Vec<usize> = mask_key.iter().copied().filter(|&p| p != pos).collect();
                let mut buckets: HashMap<Vec<bool>, (Vec<usize>, Vec<usize>)> = HashMap::new();

                for (idx, obj) in group.iter().enumerate() {
                    if consumed[idx] {
                        continue;
                    }
                    let key: Vec<bool> = others.iter().map(|&p| obj.at(p) == Ternary::True).collect();
                    let entry = buckets.entry(key).or_default();
                    if obj.at(pos) == Ternary::True {
                        entry.0.push(idx);
                    } else {
                        entry.1.push(idx);
                    }
                }

                for (_key, (true_side, false_side)) in buckets {
                    let pairs = true_side.len().min(false_side.len());
                    for k in 0..pairs {
                        let a = &group[true_side[k]];
                        let mut merged = a.clone();
                        merged.set(pos, Ternary::DontCare);
                        produced.push(merged);
                        consumed[true_side[k]] = true;
                        consumed[false_side[k]] = true;
                        changed = true;
                    }
                }
            }

            for (idx, obj) in group.into_iter().enumerate() {
                if !consumed[idx] {
                    result.push(obj);
                }
            }
            result.extend(produced);
        }

        self.objects = result;
        changed
    }

    /// Ternary Cartesian product: for every pair `(a, b)`, compute `a·b`,
    /// drop ⊥ results, simplify the result. Commutative and associative up
    /// to semantic equality.
    pub fn multiply(&self, other: &StateVector) -> StateVector {
        debug_assert_eq!(self.n, other.n);
        let mut out = StateVector::empty(self.n);
        for a in &self.objects {
            for b in &other.objects {
                if let Some(m) = a.multiply(b) {
                    out.push(m);
                }
            }
        }
        out.simplify();
        out
    }

    /// Consolidated value at `index`: `T` iff every member pins it to `T`,
    /// `F` symmetrically, else `X`. Undefined (returns `X`) on an empty
    /// StateVector; callers should check `is_empty()` first.
    pub fn get_value(&self, index: usize) -> Ternary {
        if self.objects.is_empty() {
            return Ternary::DontCare;
        }
        let mut all_true = true;
        let mut all_false = true;
        for obj in &self.objects {
            match obj.at(index) {
                Ternary::True => all_false = false,
                Ternary::False => all_true = false,
                Ternary::DontCare => {
                    all_true = false;
                    all_false = false;
                }
            }
        }
        if all_true {
            Ternary::True
        } else if all_false {
            Ternary::False
        } else {
            Ternary::DontCare
        }
    }

    /// Every concrete assignment covered by every member, expanded to
    /// `name -> bool` maps. Finite and restartable: recomputed fresh on
    /// every call, never consumed.
    pub fn iter_dicts(&self, name_of: &[String]) -> Vec<HashMap<String, bool>> {
        let mut out = Vec::new();
        for obj in &self.objects {
            expand_object(obj, name_of, &mut out);
        }
        out
    }

    /// Textual dump for diagnostics. Format is not part of the compatibility
    /// surface.
    pub fn print(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut lines = Vec::new();
        for obj in &self.objects {
            let row: String = (0..self.n).map(|i| obj.at(i).to_string()).collect::<Vec<_>>().join(" ");
            lines.push(format!("{pad}[{row}]"));
        }
        lines.join("\n")
    }
}

/// Expand one TObject's don't-care positions into every concrete assignment.
fn expand_object(obj: &TObject, name_of: &[String], out: &mut Vec<HashMap<String, bool>>) {
    let dont_cares: Vec<usize> = (0..obj.len()).filter(|&i| obj.at(i).is_dont_care()).collect();
    let base: HashMap<String, bool> = obj.to_dict(name_of);

    if dont_cares.is_empty() {
        out.push(base);
        return;
    }

    let combos = 1usize << dont_cares.len();
    for mask in 0..combos {
        let mut dict = base.clone();
        for (bit, &pos) in dont_cares.iter().enumerate() {
            let v = (mask >> bit) & 1 == 1;
            dict.insert(name_of[pos].clone(), v);
        }
        out.push(dict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tobject::TObject;

    fn sv_from(n: usize, rows: &[&[(usize, bool)]]) -> StateVector {
        let mut sv = StateVector::empty(n);
        for row in rows {
            let mut t = TObject::all_dont_care(n);
            for &(i, v) in *row {
                t.set(i, Ternary::from(v));
            }
            sv.push(t);
        }
        sv
    }

    #[test]
    fn empty_times_anything_is_empty() {
        let a = sv_from(2, &[&[(0, true)]]);
        let empty = StateVector::empty(2);
        let result = a.multiply(&empty);
        assert!(result.is_empty());
    }

    #[test]
    fn tautology_is_identity() {
        let a = sv_from(2, &[&[(0, true)], &[(0, false), (1, true)]]);
        let top = StateVector::tautology(2);
        let mut result = a.multiply(&top);
        result.simplify();
        assert_eq!(result.len(), a.len());
    }

    #[test]
    fn adjacency_merge_collapses_complementary_pair() {
        let mut sv = sv_from(2, &[&[(0, true), (1, true)], &[(0, false), (1, true)]]);
        sv.simplify();
        assert_eq!(sv.len(), 1);
        assert_eq!(sv.get(0).unwrap().at(0), Ternary::DontCare);
        assert_eq!(sv.get(0).unwrap().at(1), Ternary::True);
    }

    #[test]
    fn covering_elimination_drops_strictly_covered_member() {
        let mut sv = sv_from(2, &[&[(0, true)], &[(0, true), (1, false)]]);
        sv.simplify();
        assert_eq!(sv.len(), 1);
        assert_eq!(sv.get(0).unwrap().at(0), Ternary::True);
        assert_eq!(sv.get(0).unwrap().at(1), Ternary::DontCare);
    }

    #[test]
    fn get_value_consolidates_across_members() {
        let sv = sv_from(2, &[&[(0, true), (1, true)], &[(0, true), (1, false)]]);
        assert_eq!(sv.get_value(0), Ternary::True);
        assert_eq!(sv.get_value(1), Ternary::DontCare);
    }

    #[test]
    fn iter_dicts_expands_dont_cares() {
        let names = vec!["a".to_string(), "b".to_string()];
        let sv = sv_from(2, &[&[(0, true)]]);
        let dicts = sv.iter_dicts(&names);
        assert_eq!(dicts.len(), 2);
    }

    #[test]
    fn iter_dicts_is_restartable() {
        let names = vec!["a".to_string(), "b".to_string()];
        let sv = sv_from(2, &[&[(0, true)]]);
        let first = sv.iter_dicts(&names);
        let second = sv.iter_dicts(&names);
        assert_eq!(first, second);
    }
}
