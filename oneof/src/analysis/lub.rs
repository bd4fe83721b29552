//! Least upper bound of pattern types

use super::PatternType;
use crate::types::{Type, TypeOracle};

/// Join the resolved types ("no type" entries are ignored) and concatenate
/// the expression-type lists. Expression types survive only if every input
/// carries them: a single wildcard or variable branch makes the join a
/// non-constant pattern.
pub fn lub(oracle: &dyn TypeOracle, types: &[PatternType]) -> PatternType {
    let resolved: Vec<Type> = types.iter().map(|p| p.ty.clone()).collect();
    let ty = oracle.lub(&resolved);
    let expr_types = if types.is_empty() {
        None
    } else {
        types
            .iter()
            .map(|p| p.expr_types.clone())
            .collect::<Option<Vec<Vec<Type>>>>()
            .map(|lists| lists.into_iter().flatten().collect())
    };
    PatternType { ty, expr_types }
}
