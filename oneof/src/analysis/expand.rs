//! Union expansion

use crate::types::{Type, TypeOracle};

/// Flatten a (possibly nested, possibly aliased) union into its distinct
/// members, in first-seen order. A non-union type expands to itself.
pub fn expand(oracle: &dyn TypeOracle, ty: &Type) -> Vec<Type> {
    let mut members = Vec::new();
    collect(oracle, ty, &mut members);
    tracing::trace!(union = %ty, members = members.len(), "expanded union");
    members
}

fn collect(oracle: &dyn TypeOracle, ty: &Type, members: &mut Vec<Type>) {
    match oracle.dealias(ty) {
        Type::Union(left, right) => {
            collect(oracle, &left, members);
            collect(oracle, &right, members);
        }
        other => {
            if !members.contains(&other) {
                members.push(other);
            }
        }
    }
}
