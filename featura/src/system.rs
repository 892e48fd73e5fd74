//! Feature systems: validation, construction, and the algebra entry point.
//!
//! A [`FeatureSystem`] owns one validated context, its concept lattice, a
//! compiled [`FeatureParser`](crate::FeatureParser), and the string tables for
//! every feature set. It is a cheap-to-clone shared handle; all state is
//! immutable after construction, so systems can be shared freely across
//! threads.

use std::fmt;
use std::sync::Arc;

use concepta::{Context, ContextError, Lattice};
use log::debug;

use crate::config::Config;
use crate::error::{FeatError, FeatResult};
use crate::parser::{self, FeatureParser};
use crate::registry::Registry;
use crate::set::FeatureSet;

pub(crate) struct SystemInner {
    pub(crate) config: Config,
    pub(crate) lattice: Lattice,
    pub(crate) parser: FeatureParser,
    /// Space-joined minimal generator per concept index.
    pub(crate) minimal: Vec<String>,
    /// Space-joined full intent per concept index.
    pub(crate) maximal: Vec<String>,
    /// Space-joined extent labels per concept index.
    pub(crate) extents: Vec<String>,
}

/// The validated partial order of admissible feature combinations.
#[derive(Clone)]
pub struct FeatureSystem {
    inner: Arc<SystemInner>,
}

impl FeatureSystem {
    /// Build a system from its configuration.
    ///
    /// A config with a key goes through the global [`Registry`]: repeated
    /// construction under the same key returns the identical instance.
    /// Keyless configs always build a fresh system.
    pub fn new(config: Config) -> FeatResult<FeatureSystem> {
        if config.key.is_some() {
            Registry::global().get_or_create(config)
        } else {
            Self::build(config)
        }
    }

    /// Unconditional construction, bypassing the registry.
    pub(crate) fn build(config: Config) -> FeatResult<FeatureSystem> {
        let context = Context::from_str(&config.context, config.format)?;

        // Substring safety must hold before a parser can be compiled from
        // these names; checked here so the context is rejected as a whole.
        let ambiguous = parser::substring_pairs(context.properties());
        if !ambiguous.is_empty() {
            return Err(FeatError::AmbiguousFeatureNames(ambiguous));
        }

        let lattice = context.lattice();
        Self::check_atomic(&lattice)?;

        let context = lattice.context();
        let parser = FeatureParser::new(context.properties().iter().cloned())?;

        let mut minimal = Vec::with_capacity(lattice.len());
        let mut maximal = Vec::with_capacity(lattice.len());
        let mut extents = Vec::with_capacity(lattice.len());
        for concept in lattice.concepts() {
            minimal.push(join_names(
                context.properties(),
                concept.minimal().iter().copied(),
            ));
            maximal.push(join_names(context.properties(), concept.intent().iter()));
            extents.push(join_names(context.objects(), concept.extent().iter()));
        }

        debug!(
            "built feature system {:?}: {} atoms, {} feature sets",
            config.key,
            lattice.atoms().len(),
            lattice.len()
        );
        Ok(FeatureSystem {
            inner: Arc::new(SystemInner {
                config,
                lattice,
                parser,
                minimal,
                maximal,
                extents,
            }),
        })
    }

    /// Every object must be the extent of exactly one lattice atom, in order.
    fn check_atomic(lattice: &Lattice) -> FeatResult<()> {
        let atoms = lattice.atoms();
        let atomic = atoms.len() == lattice.context().object_count()
            && atoms.iter().enumerate().all(|(i, &a)| {
                let extent = lattice.concept(a).extent();
                extent.len() == 1 && extent.contains(i)
            });
        if atomic {
            Ok(())
        } else {
            Err(FeatError::NotAtomic {
                context: lattice.context().to_string(),
            })
        }
    }

    pub(crate) fn from_inner(inner: Arc<SystemInner>) -> FeatureSystem {
        FeatureSystem { inner }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.inner.config
    }

    pub(crate) fn set(&self, index: usize) -> FeatureSet {
        FeatureSet::new(Arc::clone(&self.inner), index)
    }

    /// Registry key, when configured.
    pub fn key(&self) -> Option<&str> {
        self.inner.config.key.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.inner.config.description
    }

    /// Resolve free text to a feature set.
    ///
    /// Fails with [`FeatError::InvalidCombination`] when the text denotes the
    /// inconsistent (infimum) combination.
    pub fn resolve(&self, input: &str) -> FeatResult<FeatureSet> {
        let features = self.inner.parser.parse(input)?;
        self.lookup(&features, false, input)
    }

    /// Like [`resolve`](Self::resolve), but returns the infimum sentinel for
    /// inconsistent combinations instead of failing.
    pub fn resolve_lenient(&self, input: &str) -> FeatResult<FeatureSet> {
        let features = self.inner.parser.parse(input)?;
        self.lookup(&features, true, input)
    }

    /// Resolve an already-ordered sequence of canonical feature names.
    pub fn resolve_features<S: AsRef<str>>(&self, features: &[S]) -> FeatResult<FeatureSet> {
        let input = join_refs(features);
        self.lookup(features, false, &input)
    }

    /// Lenient variant of [`resolve_features`](Self::resolve_features).
    pub fn resolve_features_lenient<S: AsRef<str>>(
        &self,
        features: &[S],
    ) -> FeatResult<FeatureSet> {
        let input = join_refs(features);
        self.lookup(features, true, &input)
    }

    fn lookup<S: AsRef<str>>(
        &self,
        features: &[S],
        allow_infimum: bool,
        input: &str,
    ) -> FeatResult<FeatureSet> {
        let index = self
            .inner
            .lattice
            .concept_by_properties(features.iter().map(AsRef::as_ref))
            .map_err(|e| match e {
                ContextError::UnknownProperty(_) => FeatError::UnmatchedFeatureText {
                    input: input.to_string(),
                    known: self.inner.parser.features().to_vec(),
                },
                other => FeatError::Context(other),
            })?;
        if index == 0 && !allow_infimum {
            return Err(FeatError::InvalidCombination {
                input: input.to_string(),
                system: self.to_string(),
            });
        }
        Ok(self.set(index))
    }

    /// The most specific (usually inconsistent) combination.
    pub fn infimum(&self) -> FeatureSet {
        self.set(0)
    }

    /// The unconstrained combination.
    pub fn supremum(&self) -> FeatureSet {
        self.set(self.len() - 1)
    }

    /// Minimal non-infimum feature sets, one per context object.
    pub fn atoms(&self) -> Vec<FeatureSet> {
        self.inner
            .lattice
            .atoms()
            .iter()
            .map(|&i| self.set(i))
            .collect()
    }

    /// Nearest feature set subsuming all given ones; the infimum for none.
    pub fn join(&self, sets: &[FeatureSet]) -> FeatureSet {
        debug_assert!(sets.iter().all(|s| self.contains(s)));
        self.set(self.inner.lattice.join(sets.iter().map(FeatureSet::index)))
    }

    /// Nearest feature set implying all given ones; the supremum for none.
    pub fn meet(&self, sets: &[FeatureSet]) -> FeatureSet {
        debug_assert!(sets.iter().all(|s| self.contains(s)));
        self.set(self.inner.lattice.meet(sets.iter().map(FeatureSet::index)))
    }

    /// All feature sets subsuming any of the given ones, ascending index,
    /// each exactly once.
    pub fn upset_union(&self, sets: &[FeatureSet]) -> Vec<FeatureSet> {
        debug_assert!(sets.iter().all(|s| self.contains(s)));
        self.inner
            .lattice
            .upset_union(sets.iter().map(FeatureSet::index))
            .into_iter()
            .map(|i| self.set(i))
            .collect()
    }

    /// All feature sets subsumed by any of the given ones, ascending index,
    /// each exactly once.
    pub fn downset_union(&self, sets: &[FeatureSet]) -> Vec<FeatureSet> {
        debug_assert!(sets.iter().all(|s| self.contains(s)));
        self.inner
            .lattice
            .downset_union(sets.iter().map(FeatureSet::index))
            .into_iter()
            .map(|i| self.set(i))
            .collect()
    }

    /// The feature set at the given concept index.
    pub fn get(&self, index: usize) -> Option<FeatureSet> {
        (index < self.len()).then(|| self.set(index))
    }

    /// Number of feature sets (= concepts).
    pub fn len(&self) -> usize {
        self.inner.lattice.len()
    }

    /// A system always holds at least the supremum.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All feature sets in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureSet> + '_ {
        (0..self.len()).map(move |i| self.set(i))
    }

    /// Whether the given feature set belongs to this system instance.
    pub fn contains(&self, set: &FeatureSet) -> bool {
        set.belongs_to(&self.inner)
    }
}

impl PartialEq for FeatureSystem {
    fn eq(&self, other: &FeatureSystem) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for FeatureSystem {}

impl fmt::Display for FeatureSystem {
    /// `<FeatureSystem('key') of N atoms M featuresets>`; the alternate form
    /// (`{:#}`) appends the full lattice table with upper neighbors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key() {
            Some(key) => format!("'{key}'"),
            None => "anonymous".to_string(),
        };
        write!(
            f,
            "<FeatureSystem({key}) of {} atoms {} featuresets>",
            self.inner.lattice.atoms().len(),
            self.len()
        )?;
        if !f.alternate() {
            return Ok(());
        }

        if !self.description().is_empty() {
            write!(f, "\n{:?}", self.description())?;
        }
        let width = (0..self.len())
            .map(|i| self.set(i).to_string().len())
            .max()
            .unwrap_or(0);
        let neighbors = |set: &FeatureSet| {
            set.upper_neighbors()
                .iter()
                .map(FeatureSet::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        let infimum = self.infimum();
        write!(
            f,
            "\n    {:<width$} -> {}",
            infimum.to_string(),
            neighbors(&infimum)
        )?;
        for i in 1..self.len() {
            let set = self.set(i);
            write!(f, "\n    {:<width$} -> {}", set.to_string(), neighbors(&set))?;
        }
        Ok(())
    }
}

impl fmt::Debug for FeatureSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

fn join_names<I: IntoIterator<Item = usize>>(names: &[String], indices: I) -> String {
    let parts: Vec<&str> = indices.into_iter().map(|i| names[i].as_str()).collect();
    parts.join(" ")
}

fn join_refs<S: AsRef<str>>(features: &[S]) -> String {
    features
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
