//! Feature sets: shared handles into one system's concept lattice.
//!
//! A [`FeatureSet`] is a cheap copyable pair of system handle and concept
//! index. Two sets compare equal exactly when they denote the same concept of
//! the same system instance; sets from different instances are never equal and
//! never ordered, even when built from identical contexts.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitXor, Rem};
use std::sync::Arc;

use bit_set::BitSet;

use crate::system::{FeatureSystem, SystemInner};

/// One admissible feature combination of a [`FeatureSystem`].
#[derive(Clone)]
pub struct FeatureSet {
    system: Arc<SystemInner>,
    index: usize,
}

impl FeatureSet {
    pub(crate) fn new(system: Arc<SystemInner>, index: usize) -> FeatureSet {
        FeatureSet { system, index }
    }

    pub(crate) fn belongs_to(&self, inner: &Arc<SystemInner>) -> bool {
        Arc::ptr_eq(&self.system, inner)
    }

    fn same_system(&self, other: &FeatureSet) -> bool {
        Arc::ptr_eq(&self.system, &other.system)
    }

    fn peer(&self, index: usize) -> FeatureSet {
        FeatureSet {
            system: Arc::clone(&self.system),
            index,
        }
    }

    /// Concept index within the owning system, ascending in specificity-first
    /// order: 0 is the infimum, the last index the supremum.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The owning system.
    pub fn system(&self) -> FeatureSystem {
        FeatureSystem::from_inner(Arc::clone(&self.system))
    }

    /// Shortest feature notation denoting this set.
    pub fn minimal_string(&self) -> &str {
        &self.system.minimal[self.index]
    }

    /// Full intent notation: every feature this set entails.
    pub fn maximal_string(&self) -> &str {
        &self.system.maximal[self.index]
    }

    /// Space-joined labels of the denoted objects.
    pub fn extent_string(&self) -> &str {
        &self.system.extents[self.index]
    }

    fn extent(&self) -> &BitSet {
        self.system.lattice.concept(self.index).extent()
    }

    /// Whether this is the supremum, the set carrying no information.
    pub fn is_empty(&self) -> bool {
        self.index == self.system.lattice.len() - 1
    }

    /// Whether `self` generalizes `other`: every object denoted by `other`
    /// is denoted by `self`. Always false across system instances.
    pub fn subsumes(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && self.system.lattice.subsumes(self.index, other.index)
    }

    /// Whether `self` entails `other`: the converse of
    /// [`subsumes`](Self::subsumes).
    pub fn implies(&self, other: &FeatureSet) -> bool {
        other.subsumes(self)
    }

    pub fn properly_subsumes(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && self.system.lattice.properly_subsumes(self.index, other.index)
    }

    pub fn properly_implies(&self, other: &FeatureSet) -> bool {
        other.properly_subsumes(self)
    }

    /// Atomic sets below this one, in atom order.
    pub fn atoms(&self) -> Vec<FeatureSet> {
        self.system
            .lattice
            .concept(self.index)
            .atoms()
            .iter()
            .map(|&i| self.peer(i))
            .collect()
    }

    /// Direct covers: the least sets properly subsuming this one.
    pub fn upper_neighbors(&self) -> Vec<FeatureSet> {
        self.system
            .lattice
            .concept(self.index)
            .upper_neighbors()
            .iter()
            .map(|&i| self.peer(i))
            .collect()
    }

    /// Direct covers from below: the greatest sets this one properly subsumes.
    pub fn lower_neighbors(&self) -> Vec<FeatureSet> {
        self.system
            .lattice
            .concept(self.index)
            .lower_neighbors()
            .iter()
            .map(|&i| self.peer(i))
            .collect()
    }

    /// All sets subsuming this one (itself included), ascending index.
    pub fn upset(&self) -> impl Iterator<Item = FeatureSet> + '_ {
        self.system
            .lattice
            .upset(self.index)
            .map(move |i| self.peer(i))
    }

    /// All sets this one subsumes (itself included), from most informative
    /// downwards: descending extent size, ascending index within a size.
    pub fn downset(&self) -> impl Iterator<Item = FeatureSet> + '_ {
        self.system
            .lattice
            .downset(self.index)
            .into_iter()
            .map(move |i| self.peer(i))
    }

    /// Closest common generalization: the join, also available as `a % b`.
    pub fn intersection(&self, other: &FeatureSet) -> FeatureSet {
        assert!(self.same_system(other), "feature sets from different systems");
        self.peer(self.system.lattice.join([self.index, other.index]))
    }

    /// Closest common specialization: the meet, also available as `a ^ b`.
    pub fn union(&self, other: &FeatureSet) -> FeatureSet {
        assert!(self.same_system(other), "feature sets from different systems");
        self.peer(self.system.lattice.meet([self.index, other.index]))
    }

    fn universe_len(&self) -> usize {
        self.system.lattice.context().object_count()
    }

    fn extent_relation(&self, other: &FeatureSet) -> (usize, usize, usize, usize) {
        let a = self.extent();
        let b = other.extent();
        let common = a.intersection(b).count();
        let total = a.union(b).count();
        (a.len(), b.len(), common, total)
    }

    /// Contrary opposition: no object satisfies both.
    pub fn incompatible_with(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && {
            let (_, _, common, _) = self.extent_relation(other);
            common == 0
        }
    }

    /// Contradictory opposition: disjoint and jointly exhaustive.
    pub fn complement_of(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && {
            let (_, _, common, total) = self.extent_relation(other);
            common == 0 && total == self.universe_len()
        }
    }

    /// Subcontrary opposition: overlapping and jointly exhaustive.
    pub fn subcontrary_with(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && {
            let (_, _, common, total) = self.extent_relation(other);
            common != 0 && total == self.universe_len()
        }
    }

    /// Proper overlap without exhaustion: each denotes objects the other
    /// excludes, and some object escapes both.
    pub fn orthogonal_to(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && {
            let (a, b, common, total) = self.extent_relation(other);
            common != 0 && common != a && common != b && total != self.universe_len()
        }
    }

    /// Upper neighbors with the supremum filtered out.
    pub fn upper_neighbors_nonsup(&self) -> Vec<FeatureSet> {
        let sup = self.system.lattice.len() - 1;
        self.system
            .lattice
            .concept(self.index)
            .upper_neighbors()
            .iter()
            .copied()
            .filter(|&i| i != sup)
            .map(|i| self.peer(i))
            .collect()
    }

    /// Merged upper neighbors of two sets, supremum filtered out.
    ///
    /// When one set properly subsumes the other, only the more specific set's
    /// neighbors are returned. Otherwise the two cover lists are merged in
    /// ascending index order, each neighbor once.
    pub fn upper_neighbors_union_nonsup(&self, other: &FeatureSet) -> Vec<FeatureSet> {
        assert!(self.same_system(other), "feature sets from different systems");
        if other.properly_subsumes(self) {
            return self.upper_neighbors();
        }
        if self.properly_subsumes(other) {
            return other.upper_neighbors();
        }
        let sup = self.system.lattice.len() - 1;
        let mut merged = BitSet::new();
        for &i in self.system.lattice.concept(self.index).upper_neighbors() {
            merged.insert(i);
        }
        for &i in self.system.lattice.concept(other.index).upper_neighbors() {
            merged.insert(i);
        }
        merged.remove(sup);
        merged.iter().map(|i| self.peer(i)).collect()
    }

    /// The upset without the supremum, ascending index.
    pub fn upset_nonsup(&self) -> impl Iterator<Item = FeatureSet> + '_ {
        let sup = self.system.lattice.len() - 1;
        self.system
            .lattice
            .upset(self.index)
            .filter(move |&i| i != sup)
            .map(move |i| self.peer(i))
    }

    /// Union of both upsets without the supremum, ascending index.
    pub fn upset_union_nonsup(&self, other: &FeatureSet) -> Vec<FeatureSet> {
        assert!(self.same_system(other), "feature sets from different systems");
        let sup = self.system.lattice.len() - 1;
        self.system
            .lattice
            .upset_union([self.index, other.index])
            .into_iter()
            .filter(|&i| i != sup)
            .map(|i| self.peer(i))
            .collect()
    }
}

impl PartialEq for FeatureSet {
    fn eq(&self, other: &FeatureSet) -> bool {
        self.same_system(other) && self.index == other.index
    }
}

impl Eq for FeatureSet {}

impl Hash for FeatureSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.system), self.index).hash(state);
    }
}

impl PartialOrd for FeatureSet {
    /// Subsumption order: `a < b` when `a` properly subsumes (generalizes)
    /// `b`, so the supremum is the minimum. Sets from different system
    /// instances are incomparable.
    fn partial_cmp(&self, other: &FeatureSet) -> Option<Ordering> {
        if !self.same_system(other) {
            return None;
        }
        if self.index == other.index {
            Some(Ordering::Equal)
        } else if self.system.lattice.subsumes(self.index, other.index) {
            Some(Ordering::Less)
        } else if self.system.lattice.subsumes(other.index, self.index) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Rem for &FeatureSet {
    type Output = FeatureSet;

    fn rem(self, rhs: &FeatureSet) -> FeatureSet {
        self.intersection(rhs)
    }
}

impl BitXor for &FeatureSet {
    type Output = FeatureSet;

    fn bitxor(self, rhs: &FeatureSet) -> FeatureSet {
        self.union(rhs)
    }
}

impl fmt::Display for FeatureSet {
    /// `[+1 +sg]`; systems configured with `str_maximal` render the full
    /// intent instead of the minimal generator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.system.config.str_maximal {
            write!(f, "[{}]", self.maximal_string())
        } else {
            write!(f, "[{}]", self.minimal_string())
        }
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureSet({:?})", self.minimal_string())
    }
}
