//! Domain Services
//!
//! Stateless transformations over domain entities.

pub mod prefixer;

pub use prefixer::{rewrite, DanglingReference, RenameMap, RewriteError};
