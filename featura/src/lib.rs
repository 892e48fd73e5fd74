//! Feature algebra for linguistic feature systems.
//!
//! A feature system is defined by a formal context tabulating which objects
//! (fully specified category instances) carry which signed feature
//! properties. The concept lattice of that context yields every admissible
//! feature combination, its implication closure, and the subsumption order
//! between combinations; [`FeatureSet`] handles expose that order together
//! with joins, meets, and logical-opposition tests.
//!
//! ```
//! use featura::{Config, FeatureSystem};
//!
//! let table = "
//!      |+female|-female|
//! woman|X      |       |
//! man  |       |X      |
//! ";
//! let system = FeatureSystem::new(Config::new(table))?;
//! let woman = system.resolve("+female")?;
//! let man = system.resolve("-female")?;
//!
//! assert_eq!(woman.to_string(), "[+female]");
//! assert!(system.supremum().subsumes(&woman));
//! assert!(woman.complement_of(&man));
//! assert_eq!(&woman % &man, system.supremum());
//! # Ok::<(), featura::FeatError>(())
//! ```
//!
//! Systems built from a [`Config`] carrying a key are registered process-wide
//! and constructed at most once, so every consumer of the key shares one
//! instance and feature-set equality is plain identity.

pub mod config;
pub mod error;
pub mod parser;
pub mod registry;
mod serial;
pub mod set;
pub mod system;

pub use concepta::{Concept, Context, ContextError, ContextFormat, Lattice};

pub use crate::config::Config;
pub use crate::error::{FeatError, FeatResult};
pub use crate::parser::FeatureParser;
pub use crate::registry::Registry;
pub use crate::set::FeatureSet;
pub use crate::system::FeatureSystem;
