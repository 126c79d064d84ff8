//! The ternary object (`TObject`): a single assignment over all declared
//! variables, using a two-bitset representation.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;

use crate::ternary::Ternary;

/// One ternary assignment over `n` variables.
///
/// `defined[i]` is set iff position `i` is not `X`; `value[i]` holds the
/// boolean value at position `i` when `defined[i]` is set (otherwise it is
/// meaningless and ignored by every operation below). This keeps
/// `multiply`/`covers`/`adjacent` to `O(n/w)`-word bitwise operations.
#[derive(Debug, Clone)]
pub struct TObject {
    len: usize,
    defined: FixedBitSet,
    value: FixedBitSet,
}

impl TObject {
    /// Build the all-X TObject of length `n` (covers every assignment).
    pub fn all_dont_care(n: usize) -> Self {
        TObject {
            len: n,
            defined: FixedBitSet::with_capacity(n),
            value: FixedBitSet::with_capacity(n),
        }
    }

    /// Build a TObject with a single position pinned, everything else X.
    pub fn with_pinned(n: usize, index: usize, value: bool) -> Self {
        let mut t = TObject::all_dont_care(n);
        t.set(index, Ternary::from(value));
        t
    }

    /// Number of declared variables this object spans.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` iff this object spans no variables (only meaningful for `n == 0`).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the ternary value at `index`.
    pub fn at(&self, index: usize) -> Ternary {
        if !self.defined.contains(index) {
            Ternary::DontCare
        } else if self.value.contains(index) {
            Ternary::True
        } else {
            Ternary::False
        }
    }

    /// Set position `index`. Construction-time mutation only.
    pub fn set(&mut self, index: usize, v: Ternary) {
        match v {
            Ternary::DontCare => {
                self.defined.set(index, false);
                self.value.set(index, false);
            }
            Ternary::True => {
                self.defined.set(index, true);
                self.value.set(index, true);
            }
            Ternary::False => {
                self.defined.set(index, true);
                self.value.set(index, false);
            }
        }
    }

    /// The positions this object constrains (not X).
    pub fn defined_mask(&self) -> &FixedBitSet {
        &self.defined
    }

    /// `self.covers(other)`: every assignment covered by `other` is also
    /// covered by `self` — `self.defined ⊆ other.defined` and `self.value`
    /// agrees with `other.value` on `self.defined`.
    pub fn covers(&self, other: &TObject) -> bool {
        debug_assert_eq!(self.len, other.len);
        if !self.defined.is_subset(&other.defined) {
            return false;
        }
        // Agreement only needs checking where self is defined.
        let mut disagreement = self.value.clone();
        disagreement.symmetric_difference_with(&other.value);
        disagreement.intersect_with(&self.defined);
        disagreement.count_ones(..) == 0
    }

    /// If `self` and `other` share the same `defined` mask and differ at
    /// exactly one position, returns that position.
    pub fn adjacent(&self, other: &TObject) -> Option<usize> {
        if self.defined != other.defined {
            return None;
        }
        let mut diff = self.value.clone();
        diff.symmetric_difference_with(&other.value);
        diff.intersect_with(&self.defined);
        if diff.count_ones(..) == 1 {
            diff.ones().next()
        } else {
            None
        }
    }

    /// Ternary conjunction: combine position-by-position; `None` (⊥) if any
    /// position is `F·T`.
    pub fn multiply(&self, other: &TObject) -> Option<TObject> {
        debug_assert_eq!(self.len, other.len);
        // A conflict exists iff both define a position and disagree on value.
        let mut conflict = self.defined.clone();
        conflict.intersect_with(&other.defined);
        let mut value_diff = self.value.clone();
        value_diff.symmetric_difference_with(&other.value);
        conflict.intersect_with(&value_diff);
        if conflict.count_ones(..) > 0 {
            return None;
        }

        let mut defined = self.defined.clone();
        defined.union_with(&other.defined);
        // Value bits: self's value where self defines, else other's.
        let mut value = self.value.clone();
        value.intersect_with(&self.defined);
        let mut other_contrib = other.value.clone();
        other_contrib.intersect_with(&other.defined);
        let mut self_defined_complement = self.defined.clone();
        self_defined_complement.toggle_range(..);
        other_contrib.intersect_with(&self_defined_complement);
        value.union_with(&other_contrib);

        Some(TObject {
            len: self.len,
            defined,
            value,
        })
    }

    /// Export every defined position as `name -> bool`.
    pub fn to_dict(&self, name_of: &[String]) -> HashMap<String, bool> {
        let mut out = HashMap::new();
        for i in self.defined.ones() {
            out.insert(name_of[i].clone(), self.value.contains(i));
        }
        out
    }
}

impl PartialEq for TObject {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.defined == other.defined && self.value == other.value
    }
}
impl Eq for TObject {}

impl Hash for TObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for i in self.defined.ones() {
            i.hash(state);
        }
        state.write_u8(0xff);
        for i in self.value.ones() {
            i.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(n: usize, bits: &[(usize, bool)]) -> TObject {
        let mut t = TObject::all_dont_care(n);
        for &(i, v) in bits {
            t.set(i, Ternary::from(v));
        }
        t
    }

    #[test]
    fn all_dont_care_covers_everything() {
        let top = TObject::all_dont_care(3);
        let concrete = pinned(3, &[(0, true), (1, false), (2, true)]);
        assert!(top.covers(&concrete));
        assert!(!concrete.covers(&top));
    }

    #[test]
    fn covers_is_reflexive() {
        let a = pinned(3, &[(0, true)]);
        assert!(a.covers(&a));
    }

    #[test]
    fn adjacent_requires_equal_masks() {
        let a = pinned(2, &[(0, true), (1, false)]);
        let b = pinned(2, &[(0, false), (1, false)]);
        assert_eq!(a.adjacent(&b), Some(0));

        let c = pinned(2, &[(0, true)]);
        assert_eq!(a.adjacent(&c), None);
    }

    #[test]
    fn multiply_conflict_is_none() {
        let a = pinned(1, &[(0, true)]);
        let b = pinned(1, &[(0, false)]);
        assert!(a.multiply(&b).is_none());
    }

    #[test]
    fn multiply_merges_defined_positions() {
        let a = pinned(2, &[(0, true)]);
        let b = pinned(2, &[(1, false)]);
        let m = a.multiply(&b).unwrap();
        assert_eq!(m.at(0), Ternary::True);
        assert_eq!(m.at(1), Ternary::False);
    }

    #[test]
    fn to_dict_exports_defined_only() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let t = pinned(3, &[(0, true), (2, false)]);
        let dict = t.to_dict(&names);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("a"), Some(&true));
        assert_eq!(dict.get("c"), Some(&false));
        assert_eq!(dict.get("b"), None);
    }
}
