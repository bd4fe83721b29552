//! Pattern resolution
//!
//! Computes the type a pattern matches. Literal and stable-identifier
//! patterns also record their own narrow type as an expression type, which
//! later feeds literal refinement.

use std::collections::HashMap;

use super::{PatternType, align, lub};
use crate::ast::{Pattern, Spanned};
use crate::error::{CompileError, Result};
use crate::types::{ExtractorSig, PatternHead, Type, TypeOracle};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Top-level alternatives of a clause pattern. A bind around an
/// alternation (`x @ (A | B)`) is split too, since the name adds nothing.
pub fn alternatives(pattern: &Spanned<Pattern>) -> Vec<&Spanned<Pattern>> {
    match &pattern.node {
        Pattern::Alt(alts) => alts.iter().flat_map(alternatives).collect(),
        Pattern::Bind { pattern: inner, .. } if matches!(inner.node, Pattern::Alt(_)) => {
            alternatives(inner)
        }
        _ => vec![pattern],
    }
}

pub struct PatternResolver<'a> {
    oracle: &'a dyn TypeOracle,
}

impl<'a> PatternResolver<'a> {
    pub fn new(oracle: &'a dyn TypeOracle) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    /// One pattern type per top-level alternative, in source order
    pub fn resolve(&self, pattern: &Spanned<Pattern>) -> Result<Vec<PatternType>> {
        alternatives(pattern)
            .into_iter()
            .map(|alt| self.resolve_one(alt))
            .collect()
    }

    /// Single pattern type; nested alternatives are joined
    pub fn resolve_one(&self, pattern: &Spanned<Pattern>) -> Result<PatternType> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            let resolved = self.resolve_inner(pattern)?;
            tracing::trace!(pattern = %pattern.node, ty = %resolved.ty, "resolved pattern");
            Ok(resolved)
        })
    }

    fn resolve_inner(&self, pattern: &Spanned<Pattern>) -> Result<PatternType> {
        match &pattern.node {
            Pattern::Wildcard | Pattern::Var(_) => Ok(PatternType::no_type()),
            Pattern::Literal(lit) => Ok(PatternType::constant(Type::Literal(lit.clone()))),
            Pattern::Ref(path) => Ok(self
                .oracle
                .value_type(path)
                .map(PatternType::constant)
                .unwrap_or_else(PatternType::no_type)),
            Pattern::Bind { pattern: inner, .. } | Pattern::Star(inner) => self.resolve_one(inner),
            Pattern::Typed { pattern: inner, ty } => {
                let inner = self.resolve_one(inner)?;
                Ok(PatternType {
                    ty: self.oracle.resolve_type_expr(ty)?,
                    expr_types: inner.expr_types,
                })
            }
            Pattern::Alt(alts) => {
                let resolved = alts
                    .iter()
                    .map(|alt| self.resolve_one(alt))
                    .collect::<Result<Vec<_>>>()?;
                Ok(lub(self.oracle, &resolved))
            }
            Pattern::Apply { head, args } => match self.oracle.pattern_head(&head.node) {
                Some(PatternHead::Constructor(sig)) => {
                    align::resolve_constructor(self, pattern, &sig, args)
                }
                Some(PatternHead::Extractor(sig)) => self.resolve_extractor(pattern, &sig, args),
                None => Err(CompileError::malformed(
                    format!("pattern not recognized: `{}`", pattern.node),
                    pattern.span,
                )),
            },
        }
    }

    /// The extractor's single type parameter is instantiated with the join
    /// of its arguments
    fn resolve_extractor(
        &self,
        pattern: &Spanned<Pattern>,
        sig: &ExtractorSig,
        args: &[Spanned<Pattern>],
    ) -> Result<PatternType> {
        let [param] = sig.type_params.as_slice() else {
            return Err(CompileError::malformed(
                format!(
                    "extractor `{}` must have exactly one type parameter, found {}",
                    sig.name,
                    sig.type_params.len()
                ),
                pattern.span,
            ));
        };
        let resolved = args
            .iter()
            .map(|arg| self.resolve_one(arg))
            .collect::<Result<Vec<_>>>()?;
        let joined = lub(self.oracle, &resolved);
        let subst = HashMap::from([(param.name.clone(), self.oracle.widen(&joined.ty))]);
        Ok(PatternType::new(sig.scrutinee.substitute(&subst)))
    }
}
