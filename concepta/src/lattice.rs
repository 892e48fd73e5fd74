//! Concept lattices over formal contexts.
//!
//! Role
//! - Enumerate every formal concept of a [`Context`]: the closed
//!   (extent, intent) pairs of the Galois connection induced by the incidence
//!   relation.
//! - Assign each concept a stable index in **shortlex order of extents**
//!   (ascending extent size, ties broken lexicographically by object index),
//!   so index 0 is the infimum, the last index the supremum, and index order
//!   is a linear extension of subsumption.
//! - Answer order queries (subsumption, covers, upsets/downsets) and compute
//!   joins and meets over arbitrary concept selections.
//!
//! Contexts stay small (feature inventories, not data mining), so concepts
//! are enumerated by intersecting attribute extents and order relations are
//! precomputed pairwise at build time.

use std::collections::{HashMap, HashSet};

use bit_set::BitSet;
use log::debug;
use smallvec::SmallVec;

use crate::context::Context;
use crate::error::{ContextError, ContextResult};

type IndexVec = SmallVec<[usize; 4]>;

/// A formal concept: a closed extent/intent pair with its order environment.
///
/// Immutable once the lattice is built; everything here is precomputed.
#[derive(Debug, Clone)]
pub struct Concept {
    index: usize,
    extent: BitSet,
    intent: BitSet,
    minimal: Vec<usize>,
    upper: IndexVec,
    lower: IndexVec,
    atoms: IndexVec,
    upset: BitSet,
    downset: BitSet,
}

impl Concept {
    /// Position of this concept within its lattice.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Object indices shared by every property in the intent.
    pub fn extent(&self) -> &BitSet {
        &self.extent
    }

    /// Property indices shared by every object in the extent.
    pub fn intent(&self) -> &BitSet {
        &self.intent
    }

    /// The minimal generator: the shortlex-least subset of the intent whose
    /// extension equals the extent. Empty for the supremum.
    pub fn minimal(&self) -> &[usize] {
        &self.minimal
    }

    /// Indices of the upper covers, ascending.
    pub fn upper_neighbors(&self) -> &[usize] {
        &self.upper
    }

    /// Indices of the lower covers, ascending.
    pub fn lower_neighbors(&self) -> &[usize] {
        &self.lower
    }

    /// Indices of the lattice atoms below this concept, ascending.
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Index set of all concepts subsuming this one, including itself.
    pub fn upset_set(&self) -> &BitSet {
        &self.upset
    }

    /// Index set of all concepts subsumed by this one, including itself.
    pub fn downset_set(&self) -> &BitSet {
        &self.downset
    }
}

/// The complete concept lattice of one [`Context`].
#[derive(Debug, Clone)]
pub struct Lattice {
    context: Context,
    concepts: Vec<Concept>,
    lattice_atoms: IndexVec,
    extent_index: HashMap<Vec<usize>, usize>,
}

impl Lattice {
    pub(crate) fn build(context: Context) -> Lattice {
        let attribute_extents: Vec<BitSet> = (0..context.property_count())
            .map(|p| context.attribute_extent(p))
            .collect();

        // The closed extents are exactly the intersections of attribute
        // extents, seeded with the universe. One pass over the attributes
        // closes the system under intersection.
        let universe = context.universe();
        let mut extents: Vec<BitSet> = vec![universe.clone()];
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        seen.insert(universe.iter().collect());
        for attribute in &attribute_extents {
            let mut fresh = Vec::new();
            for extent in &extents {
                let mut candidate = extent.clone();
                candidate.intersect_with(attribute);
                if seen.insert(candidate.iter().collect()) {
                    fresh.push(candidate);
                }
            }
            extents.append(&mut fresh);
        }

        // Shortlex index order.
        let mut keyed: Vec<(Vec<usize>, BitSet)> = extents
            .into_iter()
            .map(|e| (e.iter().collect(), e))
            .collect();
        keyed.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

        let count = keyed.len();
        let extent_index: HashMap<Vec<usize>, usize> = keyed
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();

        let mut upsets = vec![BitSet::with_capacity(count); count];
        let mut downsets = vec![BitSet::with_capacity(count); count];
        for i in 0..count {
            for j in 0..count {
                if keyed[i].1.is_subset(&keyed[j].1) {
                    upsets[i].insert(j);
                    downsets[j].insert(i);
                }
            }
        }

        // Covers: walk subsumed concepts from the largest down; anything not
        // yet below a chosen cover is itself a cover.
        let mut lowers: Vec<IndexVec> = vec![IndexVec::new(); count];
        let mut uppers: Vec<IndexVec> = vec![IndexVec::new(); count];
        for i in 0..count {
            let mut covered = BitSet::with_capacity(count);
            let below: Vec<usize> = downsets[i].iter().collect();
            for &j in below.iter().rev() {
                if j == i || covered.contains(j) {
                    continue;
                }
                lowers[i].push(j);
                covered.union_with(&downsets[j]);
            }
            lowers[i].reverse();
        }
        for i in 0..count {
            for &j in &lowers[i] {
                uppers[j].push(i);
            }
        }

        let lattice_atoms: IndexVec = uppers[0].clone();

        let concepts: Vec<Concept> = keyed
            .into_iter()
            .enumerate()
            .map(|(i, (key, extent))| {
                let intent = context.intension(key.iter().copied());
                let intent_list: Vec<usize> = intent.iter().collect();
                let minimal = minimal_generator(&context, &extent, &intent_list);
                let atoms = lattice_atoms
                    .iter()
                    .copied()
                    .filter(|&a| downsets[i].contains(a))
                    .collect();
                Concept {
                    index: i,
                    extent,
                    intent,
                    minimal,
                    upper: std::mem::take(&mut uppers[i]),
                    lower: std::mem::take(&mut lowers[i]),
                    atoms,
                    upset: std::mem::take(&mut upsets[i]),
                    downset: std::mem::take(&mut downsets[i]),
                }
            })
            .collect();

        debug!(
            "built lattice of {} concepts over {} objects x {} properties",
            count,
            context.object_count(),
            context.property_count()
        );
        Lattice {
            context,
            concepts,
            lattice_atoms,
            extent_index,
        }
    }

    /// The context this lattice was computed from.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// A lattice always holds at least the supremum.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The concept at the given index. Panics when out of range.
    pub fn concept(&self, index: usize) -> &Concept {
        &self.concepts[index]
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    /// The most specific concept (index 0, often with an empty extent).
    pub fn infimum(&self) -> &Concept {
        &self.concepts[0]
    }

    /// The most general concept (last index, full extent).
    pub fn supremum(&self) -> &Concept {
        &self.concepts[self.concepts.len() - 1]
    }

    /// Indices of the minimal non-infimum concepts, ascending.
    pub fn atoms(&self) -> &[usize] {
        &self.lattice_atoms
    }

    /// Whether concept `a` subsumes concept `b` (extent of `b` within `a`).
    pub fn subsumes(&self, a: usize, b: usize) -> bool {
        self.concepts[b].extent.is_subset(&self.concepts[a].extent)
    }

    pub fn properly_subsumes(&self, a: usize, b: usize) -> bool {
        a != b && self.subsumes(a, b)
    }

    /// The unique concept whose closure equals the given property names.
    pub fn concept_by_properties<I, S>(&self, names: I) -> ContextResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut indices = Vec::new();
        for name in names {
            let name = name.as_ref();
            indices.push(
                self.context
                    .property_index(name)
                    .ok_or_else(|| ContextError::UnknownProperty(name.to_string()))?,
            );
        }
        Ok(self.concept_of_extent(&self.context.extension(indices)))
    }

    fn concept_of_extent(&self, extent: &BitSet) -> usize {
        self.extent_index[&extent.iter().collect::<Vec<usize>>()]
    }

    /// Least upper bound of the given concepts; the infimum for none.
    pub fn join<I: IntoIterator<Item = usize>>(&self, items: I) -> usize {
        let mut bounds = self.full_index_set();
        for i in items {
            bounds.intersect_with(&self.concepts[i].upset);
        }
        bounds
            .iter()
            .next()
            .expect("common upper bounds always include the supremum")
    }

    /// Greatest lower bound of the given concepts; the supremum for none.
    pub fn meet<I: IntoIterator<Item = usize>>(&self, items: I) -> usize {
        let mut bounds = self.full_index_set();
        for i in items {
            bounds.intersect_with(&self.concepts[i].downset);
        }
        bounds
            .iter()
            .last()
            .expect("common lower bounds always include the infimum")
    }

    /// All concepts subsuming `index`, itself included, ascending index order.
    pub fn upset(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.concepts[index].upset.iter()
    }

    /// All concepts subsumed by `index`, itself included, in native order:
    /// descending extent size, ascending index within a size class.
    pub fn downset(&self, index: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = self.concepts[index].downset.iter().collect();
        indices.sort_by_key(|&i| (std::cmp::Reverse(self.concepts[i].extent.len()), i));
        indices
    }

    /// Concepts subsuming any of the given ones, deduplicated, ascending index.
    pub fn upset_union<I: IntoIterator<Item = usize>>(&self, items: I) -> Vec<usize> {
        let mut union = BitSet::with_capacity(self.concepts.len());
        for i in items {
            union.union_with(&self.concepts[i].upset);
        }
        union.iter().collect()
    }

    /// Concepts subsumed by any of the given ones, deduplicated, ascending index.
    pub fn downset_union<I: IntoIterator<Item = usize>>(&self, items: I) -> Vec<usize> {
        let mut union = BitSet::with_capacity(self.concepts.len());
        for i in items {
            union.union_with(&self.concepts[i].downset);
        }
        union.iter().collect()
    }

    fn full_index_set(&self) -> BitSet {
        let mut all = BitSet::with_capacity(self.concepts.len());
        for i in 0..self.concepts.len() {
            all.insert(i);
        }
        all
    }
}

/// Find the shortlex-least subset of `intent` whose extension is `extent`.
fn minimal_generator(context: &Context, extent: &BitSet, intent: &[usize]) -> Vec<usize> {
    if context.extension(std::iter::empty()) == *extent {
        return Vec::new();
    }
    let mut acc = Vec::new();
    for size in 1..=intent.len() {
        if let Some(found) = search_generator(context, extent, intent, size, 0, &mut acc) {
            return found;
        }
    }
    // The full intent always generates its own extent.
    intent.to_vec()
}

fn search_generator(
    context: &Context,
    extent: &BitSet,
    pool: &[usize],
    size: usize,
    start: usize,
    acc: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    if acc.len() == size {
        if context.extension(acc.iter().copied()) == *extent {
            return Some(acc.clone());
        }
        return None;
    }
    for i in start..pool.len() {
        if pool.len() - i < size - acc.len() {
            break;
        }
        acc.push(pool[i]);
        let found = search_generator(context, extent, pool, size, i + 1, acc);
        acc.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}
