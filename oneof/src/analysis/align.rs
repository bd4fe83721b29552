//! Type-argument alignment for constructor patterns
//!
//! Each argument of `Ctor(p1, .., pn)` is resolved and mapped back onto the
//! type parameter(s) its field instantiates. A field typed `T` binds the
//! argument type directly; a field typed `C[.., T, ..]` binds the matching
//! argument of the argument type viewed as a `C`. Parameters may appear in
//! any order and more than once, so the final type argument at each
//! position is the join of everything aligned to it.

use super::{PatternType, TypeArg, lub, resolve::PatternResolver};
use crate::ast::{Pattern, Spanned};
use crate::error::{CompileError, Result};
use crate::types::{CtorSig, Type};

/// Resolve `sig.name(args..)` to its applied result type
pub(crate) fn resolve_constructor(
    resolver: &PatternResolver<'_>,
    pattern: &Spanned<Pattern>,
    sig: &CtorSig,
    args: &[Spanned<Pattern>],
) -> Result<PatternType> {
    check_arity(pattern, sig, args.len())?;

    let mut aligned: Vec<TypeArg> = Vec::new();
    // Constant only if every argument is
    let mut expr_types: Option<Vec<Type>> = (!args.is_empty()).then(Vec::new);
    for (i, arg) in args.iter().enumerate() {
        let field = &sig.fields[i.min(sig.fields.len() - 1)];
        let resolved = resolver.resolve_one(arg)?;
        expr_types = match (expr_types.take(), &resolved.expr_types) {
            (Some(mut gathered), Some(types)) => {
                gathered.extend(types.iter().cloned());
                Some(gathered)
            }
            _ => None,
        };
        if !field.ty.mentions_param() {
            continue;
        }
        align_field(resolver, pattern, sig, &field.ty, &resolved.ty, true, &mut aligned)?;
    }

    let positions = sig
        .type_params
        .iter()
        .enumerate()
        .map(|(position, _)| {
            let at: Vec<PatternType> = aligned
                .iter()
                .filter(|a| a.position == position)
                .map(|a| a.pattern_type.clone())
                .collect();
            lub(resolver.oracle(), &at).ty
        })
        .collect();
    let ty = Type::applied(sig.name.clone(), positions);
    let unwrapped = aligned.iter().filter(|a| !a.direct).count();
    tracing::trace!(
        pattern = %pattern.node,
        %ty,
        aligned = aligned.len(),
        unwrapped,
        "aligned constructor"
    );
    Ok(PatternType { ty, expr_types })
}

fn check_arity(pattern: &Spanned<Pattern>, sig: &CtorSig, found: usize) -> Result<()> {
    let declared = sig.fields.len();
    let variadic = sig.fields.last().is_some_and(|f| f.repeated);
    let ok = if variadic {
        found + 1 >= declared
    } else {
        found == declared
    };
    if ok {
        return Ok(());
    }
    let expected = if variadic {
        format!("at least {}", declared - 1)
    } else {
        declared.to_string()
    };
    Err(CompileError::malformed(
        format!(
            "`{}` expects {expected} argument(s), found {found} in `{}`",
            sig.name, pattern.node
        ),
        pattern.span,
    ))
}

/// Map `actual` onto the parameters mentioned by the field type `field`
fn align_field(
    resolver: &PatternResolver<'_>,
    pattern: &Spanned<Pattern>,
    sig: &CtorSig,
    field: &Type,
    actual: &Type,
    direct: bool,
    out: &mut Vec<TypeArg>,
) -> Result<()> {
    let oracle = resolver.oracle();
    match field {
        Type::Param(name) => {
            let position = sig
                .type_params
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| misaligned(pattern, sig))?;
            out.push(TypeArg {
                position,
                direct,
                pattern_type: PatternType::new(oracle.widen(actual)),
            });
            Ok(())
        }
        _ if !field.mentions_param() => Ok(()),
        Type::Named { name, args } => {
            let view = match actual {
                Type::NoType | Type::Nothing => {
                    Type::applied(name.clone(), vec![actual.clone(); args.len()])
                }
                _ => oracle
                    .as_instance_of(actual, name)
                    .ok_or_else(|| misaligned(pattern, sig))?,
            };
            let Type::Named { args: view_args, .. } = &view else {
                return Err(misaligned(pattern, sig));
            };
            if view_args.len() != args.len() {
                return Err(misaligned(pattern, sig));
            }
            for (formal, inner) in args.iter().zip(view_args) {
                align_field(resolver, pattern, sig, formal, inner, false, out)?;
            }
            Ok(())
        }
        _ => Err(misaligned(pattern, sig)),
    }
}

fn misaligned(pattern: &Spanned<Pattern>, sig: &CtorSig) -> CompileError {
    CompileError::malformed(
        format!(
            "cannot align `{}` with result type `{}`",
            pattern.node,
            sig.result_type()
        ),
        pattern.span,
    )
}

#[cfg(test)]
mod tests {
    use super::super::PatternResolver;
    use super::align_field;
    use crate::analysis::test_support::{env, pattern, program, ty};
    use crate::error::CompileError;
    use crate::types::{Type, TypeEnv};

    fn resolved(env: &TypeEnv, source: &str) -> Type {
        PatternResolver::new(env)
            .resolve_one(&pattern(source))
            .unwrap()
            .ty
    }

    fn failure(env: &TypeEnv, source: &str) -> String {
        match PatternResolver::new(env).resolve_one(&pattern(source)) {
            Err(CompileError::Malformed { message, .. }) => message,
            other => panic!("Expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_parameter() {
        let env = env();
        assert_eq!(resolved(&env, "Some(1)"), ty(&env, "Some[Int]"));
        assert_eq!(resolved(&env, "Some(_)"), Type::applied("Some", vec![Type::NoType]));
    }

    #[test]
    fn test_reordered_parameters() {
        let env = env();
        assert_eq!(resolved(&env, "Pair(1, \"a\")"), ty(&env, "Pair[Int, String]"));
        assert_eq!(resolved(&env, "Swap(1, \"a\")"), ty(&env, "Swap[String, Int]"));
    }

    #[test]
    fn test_repeated_parameter_joins() {
        let env = env();
        assert_eq!(resolved(&env, "Twice(1, 2)"), ty(&env, "Twice[Int]"));
        assert_eq!(resolved(&env, "Twice(1, _)"), ty(&env, "Twice[Int]"));
        assert_eq!(resolved(&env, "Twice(1, \"a\")"), ty(&env, "Twice[Int | String]"));
        assert_eq!(
            resolved(&env, "Twice(Some(1), None)"),
            ty(&env, "Twice[Option[Int]]")
        );
    }

    #[test]
    fn test_repeated_field_absorbs_arguments() {
        let env = env();
        assert_eq!(resolved(&env, "Seq(1, 2, _*)"), ty(&env, "Seq[Int]"));
        assert_eq!(resolved(&env, "Seq()"), Type::applied("Seq", vec![Type::NoType]));
    }

    #[test]
    fn test_wrapped_parameter_is_unwrapped() {
        let env = env();
        assert_eq!(resolved(&env, "Wrap(Some(1))"), ty(&env, "Wrap[Int]"));
        assert_eq!(resolved(&env, "Wrap(None)"), ty(&env, "Wrap[Nothing]"));
        assert_eq!(resolved(&env, "Wrap(_)"), Type::applied("Wrap", vec![Type::NoType]));
        assert_eq!(resolved(&env, "Nest(Some(Some(\"a\")))"), ty(&env, "Nest[String]"));
    }

    #[test]
    fn test_monomorphic_field_is_skipped() {
        let env = env();
        let resolved = PatternResolver::new(&env)
            .resolve_one(&pattern("Tagged(\"t\", true)"))
            .unwrap();
        assert_eq!(resolved.ty, ty(&env, "Tagged[Bool]"));
        assert_eq!(resolved.expr_types, Some(vec![ty(&env, "\"t\""), ty(&env, "true")]));
    }

    #[test]
    fn test_constructor_with_variable_is_not_constant() {
        let env = env();
        let resolver = PatternResolver::new(&env);
        let partly = resolver.resolve_one(&pattern("Tagged(\"t\", v)")).unwrap();
        assert_eq!(partly.ty, Type::applied("Tagged", vec![Type::NoType]));
        assert_eq!(partly.expr_types, None);
        let empty = resolver.resolve_one(&pattern("Seq()")).unwrap();
        assert_eq!(empty.expr_types, None);
    }

    #[test]
    fn test_direct_and_unwrapped_positions() {
        let env = env();
        let resolver = PatternResolver::new(&env);
        let sig = env.ctor("Wrap").unwrap().clone();
        let wrap = pattern("Wrap(Some(1))");
        let mut aligned = Vec::new();
        let field = sig.fields[0].ty.clone();
        align_field(&resolver, &wrap, &sig, &field, &ty(&env, "Some[Int]"), true, &mut aligned)
            .unwrap();
        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].position, 0);
        assert!(!aligned[0].direct);
        assert_eq!(aligned[0].pattern_type.ty, ty(&env, "Int"));

        let sig = env.ctor("Some").unwrap().clone();
        let mut aligned = Vec::new();
        let field = sig.fields[0].ty.clone();
        align_field(&resolver, &pattern("Some(1)"), &sig, &field, &ty(&env, "1"), true, &mut aligned)
            .unwrap();
        assert!(aligned[0].direct);
        assert_eq!(aligned[0].pattern_type.ty, ty(&env, "Int"));
    }

    #[test]
    fn test_arity_mismatch() {
        let env = env();
        assert_eq!(
            failure(&env, "Some(1, 2)"),
            "`Some` expects 1 argument(s), found 2 in `Some(1, 2)`"
        );
        assert_eq!(
            failure(&env, "Pair(1)"),
            "`Pair` expects 2 argument(s), found 1 in `Pair(1)`"
        );
    }

    #[test]
    fn test_unrelated_wrapped_argument() {
        let env = env();
        assert_eq!(
            failure(&env, "Wrap(_: String)"),
            "cannot align `Wrap(_: String)` with result type `Wrap[T]`"
        );
    }

    #[test]
    fn test_unsupported_field_shape() {
        let mut env = env();
        env.register_program(&program("data Odd[+T](value: T | Int);"))
            .unwrap();
        assert_eq!(
            failure(&env, "Odd(1)"),
            "cannot align `Odd(1)` with result type `Odd[T]`"
        );
    }
}
