//! Name resolution and structural type checking for a parsed program.
//!
//! This crate has no concept of control-flow or reachability analysis — the
//! source language has neither `return` nor `break`, so a single top-down
//! walk that declares names as it goes and checks every expression's type
//! against its context is the entire job.

mod analysis;
mod scope;
mod types;

pub use analysis::Analyzer;
pub use scope::{Object, ObjectKind, ScopeId, ScopeTree};
pub use types::{ConstantValue, Type};
