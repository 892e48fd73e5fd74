//! Formal concept analysis primitives: contexts and concept lattices.
//!
//! This crate is the lattice engine behind `featura`. It parses a plain-text
//! [`Context`] (objects, properties, incidence), computes the complete
//! [`Lattice`] of formal concepts, and answers order and algebra queries over
//! it. Concepts carry stable indices: index 0 is the infimum, the last index
//! the supremum, and index order is a linear extension of subsumption.
//!
//! ```
//! use concepta::{Context, ContextFormat};
//!
//! let context = Context::from_str(
//!     "
//!       |pa|pb|
//!     a | X|  |
//!     b |  | X|
//!     ",
//!     ContextFormat::Table,
//! )?;
//! let lattice = context.lattice();
//! assert_eq!(lattice.len(), 4);
//!
//! let [a, b] = [lattice.atoms()[0], lattice.atoms()[1]];
//! assert_eq!(lattice.join([a, b]), lattice.supremum().index());
//! assert_eq!(lattice.meet([a, b]), lattice.infimum().index());
//! # Ok::<(), concepta::ContextError>(())
//! ```

pub mod context;
pub mod error;
pub mod lattice;

pub use context::{Context, ContextFormat};
pub use error::{ContextError, ContextResult};
pub use lattice::{Concept, Lattice};
