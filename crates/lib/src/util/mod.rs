//! Shared utilities: hashing, glob patterns, pattern-driven copying and
//! path-safe identifiers.

pub mod fs;
pub mod glob;
pub mod hash;
pub mod ident;
