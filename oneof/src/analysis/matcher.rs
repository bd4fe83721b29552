//! Membership and containment

use crate::types::{Type, TypeOracle};

/// Members of `union` the candidate matches. `Nothing` and "no type"
/// match every member; a union candidate matches what its parts match.
pub fn matching_members<'u>(
    oracle: &dyn TypeOracle,
    candidate: &Type,
    union: &'u [Type],
) -> Vec<&'u Type> {
    let parts = super::expand(oracle, candidate);
    union
        .iter()
        .filter(|member| parts.iter().any(|part| conforms(oracle, part, member)))
        .collect()
}

/// True if every part of `candidate` matches some member of `union`
pub fn is_part_of(oracle: &dyn TypeOracle, candidate: &Type, union: &[Type]) -> bool {
    super::expand(oracle, candidate)
        .iter()
        .all(|part| union.iter().any(|member| conforms(oracle, part, member)))
}

/// One message per element of `left` that is not part of `right`
pub fn contains_of(oracle: &dyn TypeOracle, left: &[Type], right: &[Type]) -> Vec<String> {
    left.iter()
        .filter(|ty| !is_part_of(oracle, ty, right))
        .map(|ty| not_a_member(ty, right))
        .collect()
}

/// `X is not a member of {A, B}`
pub fn not_a_member(ty: &Type, union: &[Type]) -> String {
    format!("{ty} is not a member of {}", format_members(union))
}

/// `{A, B}`
pub fn format_members(members: &[Type]) -> String {
    let list: Vec<String> = members.iter().map(Type::to_string).collect();
    format!("{{{}}}", list.join(", "))
}

fn conforms(oracle: &dyn TypeOracle, candidate: &Type, member: &Type) -> bool {
    match candidate {
        Type::NoType | Type::Nothing => true,
        _ => oracle.dealias(candidate) == oracle.dealias(member) || oracle.is_subtype(candidate, member),
    }
}
