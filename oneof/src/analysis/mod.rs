//! Union coverage engine
//!
//! Correlates the clauses of a partial function with the members of a
//! closed union:
//! - [`expand`] flattens a union into its distinct members
//! - [`matcher`] decides membership and containment
//! - [`PatternResolver`] computes the type each pattern matches, using
//!   [`align`] for constructor arguments and [`lub()`] to join alternatives
//! - [`UnionChecker`] runs the membership, totality and exhaustiveness
//!   checks and reports diagnostics
//!
//! The engine holds no state across checks; everything it knows about
//! types comes from a [`TypeOracle`](crate::types::TypeOracle).

mod align;
mod coverage;
mod expand;
mod lub;
pub mod matcher;
mod rename;
mod resolve;

pub use coverage::{MatchRequest, UnionChecker};
pub use expand::expand;
pub use lub::lub;
pub use matcher::{contains_of, is_part_of, matching_members};
pub use rename::{FreshNames, rename_binds};
pub use resolve::{PatternResolver, alternatives};

use crate::ast::{Pattern, Spanned};
use crate::types::Type;

/// Type matched by a pattern, plus the literal or stable-identifier types
/// it was built from. `expr_types` only feeds literal refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternType {
    pub ty: Type,
    pub expr_types: Option<Vec<Type>>,
}

impl PatternType {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            expr_types: None,
        }
    }

    /// A constant pattern: its type is also its own expression type
    pub fn constant(ty: Type) -> Self {
        Self {
            expr_types: Some(vec![ty.clone()]),
            ty,
        }
    }

    pub fn no_type() -> Self {
        Self::new(Type::NoType)
    }
}

/// One argument aligned to a formal type parameter position
#[derive(Debug, Clone, PartialEq)]
pub struct TypeArg {
    /// Index of the type parameter in the result type
    pub position: usize,
    /// The field type is the parameter itself rather than a wrapper of it
    pub direct: bool,
    pub pattern_type: PatternType,
}

/// A clause alternative matched against one union member
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub clause: usize,
    pub pattern: Spanned<Pattern>,
    pub member: Type,
    pub pattern_type: PatternType,
}
