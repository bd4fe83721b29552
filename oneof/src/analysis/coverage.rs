//! Union checks
//!
//! Entry points for membership, containment and partial-function checks.
//! A partial-function check runs up to three passes over the clauses:
//! 1. membership, always: every alternative must match some union member
//! 2. totality, on request: every member must be matched by some clause
//! 3. exhaustiveness, on request: the clauses matching a member, taken as
//!    a group, must cover every value of that member
//!
//! Membership and coverage failures are collected as diagnostics. Input
//! outside the supported grammar aborts with a `Malformed` error instead.

use super::matcher::{format_members, not_a_member};
use super::{
    FreshNames, MatchResult, PatternResolver, alternatives, contains_of, expand, is_part_of,
    matching_members, rename_binds,
};
use crate::ast::{CaseClause, Handler, Pattern, Span, Spanned};
use crate::config::CheckConfig;
use crate::error::{CompileError, Diagnostic, DiagnosticKind, Result};
use crate::types::{ExhaustivenessOracle, Type, TypeOracle, ValueRange};

/// Modes requested for one partial-function check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRequest {
    pub total: bool,
    pub exhaustive: bool,
    /// Restrict exhaustiveness to the members of this sub-union
    pub scope: Option<Spanned<Type>>,
}

impl MatchRequest {
    pub fn total(mut self, total: bool) -> Self {
        self.total = total;
        self
    }

    pub fn exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    /// Request exhaustiveness for the members of `scope` only
    pub fn within(mut self, scope: Spanned<Type>) -> Self {
        self.exhaustive = true;
        self.scope = Some(scope);
        self
    }
}

/// Counterexamples found for one matched member
struct Failure {
    inputs: Vec<String>,
    note: Option<String>,
}

pub struct UnionChecker<'a> {
    oracle: &'a dyn TypeOracle,
    exhaustiveness: &'a dyn ExhaustivenessOracle,
    config: &'a CheckConfig,
}

impl<'a> UnionChecker<'a> {
    pub fn new(
        oracle: &'a dyn TypeOracle,
        exhaustiveness: &'a dyn ExhaustivenessOracle,
        config: &'a CheckConfig,
    ) -> Self {
        Self {
            oracle,
            exhaustiveness,
            config,
        }
    }

    /// `candidate` must be part of `union`
    #[tracing::instrument(level = "debug", skip_all, fields(candidate = %candidate, union = %union))]
    pub fn check_is_part_of(&self, candidate: &Type, union: &Type, span: Span) -> Result<()> {
        let members = expand(self.oracle, union);
        if is_part_of(self.oracle, candidate, &members) {
            return Ok(());
        }
        Err(CompileError::check(vec![Diagnostic::new(
            DiagnosticKind::Membership,
            span,
            not_a_member(candidate, &members),
        )]))
    }

    /// Every member of `smaller` must be part of `bigger`
    #[tracing::instrument(level = "debug", skip_all, fields(smaller = %smaller, bigger = %bigger))]
    pub fn check_contains_some_of(&self, smaller: &Type, bigger: &Type, span: Span) -> Result<()> {
        let messages = contains_of(
            self.oracle,
            &expand(self.oracle, smaller),
            &expand(self.oracle, bigger),
        );
        containment(messages, span)
    }

    /// `left` and `right` must contain each other
    #[tracing::instrument(level = "debug", skip_all, fields(left = %left, right = %right))]
    pub fn check_contains_all_of(&self, left: &Type, right: &Type, span: Span) -> Result<()> {
        let left = expand(self.oracle, left);
        let right = expand(self.oracle, right);
        let mut messages = contains_of(self.oracle, &left, &right);
        messages.extend(contains_of(self.oracle, &right, &left));
        containment(messages, span)
    }

    /// Validate a partial function written against `union`. The handler is
    /// returned unchanged when every requested check passes.
    #[tracing::instrument(level = "debug", skip_all, fields(union = %union))]
    pub fn check_partial_function<'h>(
        &self,
        union: &Type,
        handler: &'h Spanned<Handler>,
        request: &MatchRequest,
    ) -> Result<&'h Spanned<Handler>> {
        let Handler::Cases(clauses) = &handler.node else {
            return Err(CompileError::malformed(
                "`match` must be used with a partial-function literal syntax",
                handler.span,
            ));
        };
        let members = expand(self.oracle, union);
        let scoped = self.scoped_members(&members, request.scope.as_ref())?;
        tracing::debug!(members = %format_members(&members), clauses = clauses.len(), "checking match");

        let mut diagnostics = Vec::new();
        let results = self.match_clauses(clauses, &members, &mut diagnostics)?;
        if request.total || self.config.total_by_default {
            diagnostics.extend(self.check_totality(&members, &results, handler.span));
        }
        if request.exhaustive || self.config.exhaustive_by_default {
            diagnostics.extend(self.check_exhaustiveness(clauses, &scoped, &results)?);
        }

        if diagnostics.is_empty() {
            Ok(handler)
        } else {
            Err(CompileError::check(diagnostics))
        }
    }

    /// Members whose exhaustiveness is checked
    fn scoped_members(&self, members: &[Type], scope: Option<&Spanned<Type>>) -> Result<Vec<Type>> {
        let Some(scope) = scope else {
            return Ok(members.to_vec());
        };
        let scope_members = expand(self.oracle, &scope.node);
        let outside: Vec<Type> = scope_members
            .iter()
            .filter(|s| !is_part_of(self.oracle, s, members))
            .cloned()
            .collect();
        if !outside.is_empty() {
            return Err(CompileError::malformed(
                format!(
                    "exhaustiveness scope {} is not part of {}",
                    format_members(&outside),
                    format_members(members)
                ),
                scope.span,
            ));
        }
        Ok(members
            .iter()
            .filter(|member| {
                is_part_of(self.oracle, member, &scope_members)
                    || scope_members
                        .iter()
                        .any(|s| is_part_of(self.oracle, s, std::slice::from_ref(*member)))
            })
            .cloned()
            .collect())
    }

    /// Correlate every clause alternative with the members it matches
    fn match_clauses(
        &self,
        clauses: &[CaseClause],
        members: &[Type],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<MatchResult>> {
        let resolver = PatternResolver::new(self.oracle);
        let mut results = Vec::new();
        for (index, clause) in clauses.iter().enumerate() {
            let types = resolver.resolve(&clause.pattern)?;
            for (alt, pattern_type) in alternatives(&clause.pattern).into_iter().zip(types) {
                let matched = matching_members(self.oracle, &pattern_type.ty, members);
                tracing::trace!(
                    clause = index,
                    pattern = %alt.node,
                    ty = %pattern_type.ty,
                    matched = matched.len(),
                    "matched alternative"
                );
                if !is_part_of(self.oracle, &pattern_type.ty, members) {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::Membership,
                        alt.span,
                        format!(
                            "pattern `{}` is not covered by the union: {}",
                            alt.node,
                            not_a_member(&pattern_type.ty, members)
                        ),
                    ));
                }
                for member in matched {
                    results.push(MatchResult {
                        clause: index,
                        pattern: alt.clone(),
                        member: member.clone(),
                        pattern_type: pattern_type.clone(),
                    });
                }
            }
        }
        Ok(results)
    }

    fn check_totality(
        &self,
        members: &[Type],
        results: &[MatchResult],
        span: Span,
    ) -> Option<Diagnostic> {
        let unmatched: Vec<String> = members
            .iter()
            .filter(|member| !results.iter().any(|r| &r.member == *member))
            .map(Type::to_string)
            .collect();
        let message = match unmatched.as_slice() {
            [] => return None,
            [one] => format!("union member {one} is not matched by any case"),
            many => format!("these types are not matched by any case: {}", many.join(", ")),
        };
        Some(Diagnostic::new(DiagnosticKind::Coverage, span, message))
    }

    fn check_exhaustiveness(
        &self,
        clauses: &[CaseClause],
        scoped: &[Type],
        results: &[MatchResult],
    ) -> Result<Vec<Diagnostic>> {
        let mut names = FreshNames::for_clauses(clauses);
        let mut diagnostics = Vec::new();
        for member in scoped {
            let group: Vec<&MatchResult> = results.iter().filter(|r| &r.member == member).collect();
            let Some(span) = group.iter().map(|r| r.pattern.span).reduce(Span::merge) else {
                continue;
            };
            let patterns: Vec<Spanned<Pattern>> = group
                .iter()
                .map(|r| rename_binds(&r.pattern, &mut names))
                .collect();
            let inputs = self.exhaustiveness.counterexamples(member, &patterns)?;
            let failure = if !inputs.is_empty() {
                Some(Failure { inputs, note: None })
            } else if self.config.refine_literals {
                self.refine(member, &group)
            } else {
                None
            };
            tracing::debug!(%member, rows = patterns.len(), exhaustive = failure.is_none(), "checked group");
            if let Some(failure) = failure {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::Exhaustiveness,
                    span,
                    self.describe(member, failure),
                ));
            }
        }
        Ok(diagnostics)
    }

    /// Compare the constants of a group that passed the oracle against the
    /// member's value range
    fn refine(&self, member: &Type, group: &[&MatchResult]) -> Option<Failure> {
        let mut gathered: Vec<&Type> = Vec::new();
        for result in group {
            match &result.pattern_type.expr_types {
                Some(types) if !types.is_empty() => gathered.extend(types),
                _ => return None,
            }
        }
        match self.oracle.value_range(member) {
            ValueRange::Finite(values) => {
                let inputs: Vec<String> = values
                    .iter()
                    .filter(|v| !gathered.contains(v))
                    .map(Type::to_string)
                    .collect();
                (!inputs.is_empty()).then_some(Failure { inputs, note: None })
            }
            ValueRange::Infinite => Some(Failure {
                inputs: vec![format!("_: {member}")],
                note: Some(format!(
                    "literal patterns cannot cover {member}, this may be a false negative"
                )),
            }),
            ValueRange::Structural => None,
        }
    }

    fn describe(&self, member: &Type, failure: Failure) -> String {
        let max = self.config.max_counterexamples;
        let count = failure.inputs.len();
        let mut shown: Vec<String> = failure.inputs.into_iter().take(max).collect();
        if count > max {
            shown.push("...".to_string());
        }
        let inputs = if count == 1 {
            format!("It would fail on the following input: {}", shown.join(", "))
        } else {
            format!("It would fail on these inputs: {}", shown.join(", "))
        };
        match failure.note {
            Some(note) => format!("match may not be exhaustive for {member}. {inputs} ({note})"),
            None => format!("match may not be exhaustive for {member}. {inputs}"),
        }
    }
}

fn containment(messages: Vec<String>, span: Span) -> Result<()> {
    if messages.is_empty() {
        return Ok(());
    }
    Err(CompileError::check(
        messages
            .into_iter()
            .map(|m| Diagnostic::new(DiagnosticKind::Containment, span, m))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::analysis::test_support::{env, handler, ty};
    use crate::types::{StructuralOracle, TypeEnv};

    /// Oracle that never finds a counterexample
    struct Permissive;

    impl ExhaustivenessOracle for Permissive {
        fn counterexamples(&self, _: &Type, _: &[Spanned<Pattern>]) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    /// Oracle that records the groups it is asked about
    #[derive(Default)]
    struct Recording {
        groups: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl ExhaustivenessOracle for Recording {
        fn counterexamples(&self, scrutinee: &Type, cases: &[Spanned<Pattern>]) -> Result<Vec<String>> {
            self.groups.borrow_mut().push((
                scrutinee.to_string(),
                cases.iter().map(|c| c.node.to_string()).collect(),
            ));
            Ok(Vec::new())
        }
    }

    fn run_with(
        env: &TypeEnv,
        oracle: &dyn ExhaustivenessOracle,
        config: &CheckConfig,
        union: &str,
        request: MatchRequest,
        cases: &str,
    ) -> Result<Vec<String>> {
        let union = ty(env, union);
        let handler = handler(&format!("{{ {cases} }}"));
        let checker = UnionChecker::new(env, oracle, config);
        match checker.check_partial_function(&union, &handler, &request) {
            Ok(returned) => {
                assert_eq!(returned, &handler);
                Ok(Vec::new())
            }
            Err(CompileError::Check { diagnostics }) => {
                Ok(diagnostics.into_iter().map(|d| d.message).collect())
            }
            Err(other) => Err(other),
        }
    }

    /// Messages reported with the structural oracle and default settings
    fn messages(union: &str, request: MatchRequest, cases: &str) -> Vec<String> {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        run_with(&env, &oracle, &CheckConfig::default(), union, request, cases).unwrap()
    }

    fn permissive(union: &str, config: &CheckConfig, cases: &str) -> Vec<String> {
        let env = env();
        let request = MatchRequest::default().exhaustive(true);
        run_with(&env, &Permissive, config, union, request, cases).unwrap()
    }

    fn total() -> MatchRequest {
        MatchRequest::default().total(true)
    }

    fn exhaustive() -> MatchRequest {
        MatchRequest::default().exhaustive(true)
    }

    fn scope(env: &TypeEnv, source: &str) -> Spanned<Type> {
        Spanned::new(ty(env, source), Span::new(0, source.len()))
    }

    // ============================================
    // Membership and containment
    // ============================================

    #[test]
    fn test_is_part_of() {
        let env = env();
        let config = CheckConfig::default();
        let checker = UnionChecker::new(&env, &Permissive, &config);
        let union = ty(&env, "Option[Int] | String");
        assert!(checker.check_is_part_of(&ty(&env, "Some[Int]"), &union, Span::default()).is_ok());
        let err = checker
            .check_is_part_of(&ty(&env, "Bool"), &union, Span::new(4, 8))
            .unwrap_err();
        assert_eq!(err.span(), Some(Span::new(4, 8)));
        insta::assert_snapshot!(err.message(), @"Bool is not a member of {Option[Int], String}");
    }

    #[test]
    fn test_contains_some_of() {
        let env = env();
        let config = CheckConfig::default();
        let checker = UnionChecker::new(&env, &Permissive, &config);
        let small = ty(&env, "Int | Color.Red");
        let big = ty(&env, "String | Color | Int");
        assert!(checker.check_contains_some_of(&small, &big, Span::default()).is_ok());
        let err = checker
            .check_contains_some_of(&big, &small, Span::default())
            .unwrap_err();
        let messages: Vec<&str> = err.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "String is not a member of {Int, Color.Red}",
                "Color is not a member of {Int, Color.Red}",
            ]
        );
        assert!(err.diagnostics().iter().all(|d| d.kind == DiagnosticKind::Containment));
    }

    #[test]
    fn test_contains_all_of_is_both_directions() {
        let env = env();
        let config = CheckConfig::default();
        let checker = UnionChecker::new(&env, &Permissive, &config);
        let unions = ["Int | String", "String | Int", "Int", "Int | String | Int", "Bool | Int"];
        for a in unions {
            for b in unions {
                let (a, b) = (ty(&env, a), ty(&env, b));
                let some_ab = checker.check_contains_some_of(&a, &b, Span::default()).is_ok();
                let some_ba = checker.check_contains_some_of(&b, &a, Span::default()).is_ok();
                let all = checker.check_contains_all_of(&a, &b, Span::default()).is_ok();
                assert_eq!(all, some_ab && some_ba, "{a} == {b}");
            }
        }
        let err = checker
            .check_contains_all_of(&ty(&env, "Int | Bool"), &ty(&env, "Int | String"), Span::default())
            .unwrap_err();
        let messages: Vec<&str> = err.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Bool is not a member of {Int, String}",
                "String is not a member of {Int, Bool}",
            ]
        );
    }

    #[test]
    fn test_membership_of_clauses() {
        let missing = messages(
            "Int | String",
            MatchRequest::default(),
            "case i: Int => () case true => () case s: String => ()",
        );
        assert_eq!(missing.len(), 1);
        insta::assert_snapshot!(
            missing[0],
            @"pattern `true` is not covered by the union: true is not a member of {Int, String}"
        );
    }

    #[test]
    fn test_union_ascription_must_fit_entirely() {
        let cases = "case v: (Int | Bool) => () case s: String => ()";
        let expected = vec![
            "pattern `v: Int | Bool` is not covered by the union: Int | Bool is not a member of {Int, String}",
        ];
        assert_eq!(messages("Int | String", MatchRequest::default(), cases), expected);
        // The part inside the union still counts towards totality
        assert_eq!(messages("Int | String", total(), cases), expected);
        assert!(messages("Int | String | Bool", total(), cases).is_empty());
    }

    #[test]
    fn test_membership_errors_are_collected() {
        let missing = messages(
            "Int | String",
            MatchRequest::default(),
            "case true => () case 1 => () case Color.Red | None => ()",
        );
        assert_eq!(
            missing,
            vec![
                "pattern `true` is not covered by the union: true is not a member of {Int, String}",
                "pattern `Color.Red` is not covered by the union: Color.Red is not a member of {Int, String}",
                "pattern `None` is not covered by the union: None is not a member of {Int, String}",
            ]
        );
    }

    #[test]
    fn test_membership_diagnostic_is_at_alternative() {
        let env = env();
        let source = "{ case 1 | true => () }";
        let handler = handler(source);
        let config = CheckConfig::default();
        let checker = UnionChecker::new(&env, &Permissive, &config);
        let err = checker
            .check_partial_function(&ty(&env, "Int"), &handler, &MatchRequest::default())
            .unwrap_err();
        let span = err.diagnostics()[0].span;
        // `handler` parses `match Any with <source>`
        let offset = "match Any with ".len();
        assert_eq!(&source[span.start - offset..span.end - offset], "true");
    }

    #[test]
    fn test_wildcards_and_nothing_match() {
        assert!(messages("Int | String", total(), "case _ => ()").is_empty());
        assert!(messages("Int | String", total(), "case x @ Unknown => ()").is_empty());
    }

    #[test]
    fn test_generic_patterns_match_instances() {
        let cases = "case Some(1) => () case Some(_: String) => () case None => ()";
        assert!(messages("Option[Int] | Option[String]", total(), cases).is_empty());
        assert_eq!(
            messages("Option[Int]", MatchRequest::default(), "case Some(\"a\") => ()"),
            vec![
                "pattern `Some(\"a\")` is not covered by the union: Some[String] is not a member of {Option[Int]}"
            ]
        );
    }

    // ============================================
    // Totality
    // ============================================

    #[test]
    fn test_totality_of_disjoint_scalars() {
        assert!(messages("Int | String", total(), "case i: Int => () case s: String => ()").is_empty());
        assert_eq!(
            messages("Int | String", total(), "case i: Int => ()"),
            vec!["union member String is not matched by any case"]
        );
        assert_eq!(
            messages("Int | String", total(), "case s: String => ()"),
            vec!["union member Int is not matched by any case"]
        );
    }

    #[test]
    fn test_totality_lists_all_unmatched() {
        let missing = messages("Int | String | Bool", total(), "case i: Int => ()");
        insta::assert_snapshot!(missing.join("\n"), @"these types are not matched by any case: String, Bool");
    }

    #[test]
    fn test_totality_not_requested() {
        assert!(messages("Int | String", MatchRequest::default(), "case i: Int => ()").is_empty());
    }

    #[test]
    fn test_total_by_default() {
        let env = env();
        let config = CheckConfig::default().total_by_default(true);
        let missing = run_with(
            &env,
            &Permissive,
            &config,
            "Int | String",
            MatchRequest::default(),
            "case 1 => ()",
        )
        .unwrap();
        assert_eq!(missing, vec!["union member String is not matched by any case"]);
    }

    // ============================================
    // Exhaustiveness
    // ============================================

    #[test]
    fn test_container_of_union_exhaustive() {
        let cases = "case Some(i: Int) => () case Some(s: String) => () case None => ()";
        assert!(messages("Option[Int | String]", exhaustive(), cases).is_empty());
        let missing = messages(
            "Option[Int | String]",
            exhaustive(),
            "case Some(i: Int) => () case None => ()",
        );
        insta::assert_snapshot!(
            missing.join("\n"),
            @"match may not be exhaustive for Option[Int | String]. It would fail on the following input: Some(_: String)"
        );
    }

    #[test]
    fn test_groups_are_per_member() {
        let missing = messages("Int | Option[Int]", exhaustive(), "case i: Int => () case Some(_) => ()");
        assert_eq!(
            missing,
            vec!["match may not be exhaustive for Option[Int]. It would fail on the following input: None"]
        );
    }

    #[test]
    fn test_unmatched_members_are_not_checked_for_exhaustiveness() {
        assert!(messages("Int | Bool", exhaustive(), "case i: Int => ()").is_empty());
    }

    #[test]
    fn test_several_counterexamples() {
        let missing = messages("Color", exhaustive(), "case Color.Red => ()");
        assert_eq!(
            missing,
            vec![
                "match may not be exhaustive for Color. It would fail on these inputs: Color.Green, Color.Blue"
            ]
        );
        let missing = messages("Pair[Bool, Bool]", exhaustive(), "case Pair(true, _) => ()");
        assert_eq!(
            missing,
            vec![
                "match may not be exhaustive for Pair[Bool, Bool]. It would fail on the following input: Pair(false, _)"
            ]
        );
    }

    #[test]
    fn test_counterexamples_are_elided() {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        let config = CheckConfig::default().max_counterexamples(1);
        let missing = run_with(&env, &oracle, &config, "Color", exhaustive(), "case Color.Red => ()")
            .unwrap();
        assert_eq!(
            missing,
            vec!["match may not be exhaustive for Color. It would fail on these inputs: Color.Green, ..."]
        );
    }

    #[test]
    fn test_exhaustive_by_default() {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        let config = CheckConfig::default().exhaustive_by_default(true);
        let missing = run_with(&env, &oracle, &config, "Bool", MatchRequest::default(), "case true => ()")
            .unwrap();
        assert_eq!(
            missing,
            vec!["match may not be exhaustive for Bool. It would fail on the following input: false"]
        );
    }

    #[test]
    fn test_scope_restricts_groups() {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        let config = CheckConfig::default();
        let cases = "case true => () case 1 => ()";
        let everything = run_with(&env, &oracle, &config, "Int | Bool", exhaustive(), cases).unwrap();
        assert_eq!(everything.len(), 2);
        let request = MatchRequest::default().within(scope(&env, "Bool"));
        let scoped = run_with(&env, &oracle, &config, "Int | Bool", request, cases).unwrap();
        assert_eq!(
            scoped,
            vec!["match may not be exhaustive for Bool. It would fail on the following input: false"]
        );
    }

    #[test]
    fn test_scope_member_below_union_member() {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        let config = CheckConfig::default();
        let request = MatchRequest::default().within(scope(&env, "Some[Int]"));
        let missing = run_with(&env, &oracle, &config, "Option[Int] | Bool", request, "case Some(_) => () case true => ()")
            .unwrap();
        assert_eq!(
            missing,
            vec!["match may not be exhaustive for Option[Int]. It would fail on the following input: None"]
        );
    }

    #[test]
    fn test_scope_outside_union_is_malformed() {
        let env = env();
        let oracle = StructuralOracle::new(&env);
        let request = MatchRequest::default().within(scope(&env, "Bool | String"));
        let err = run_with(&env, &oracle, &CheckConfig::default(), "Int | Bool", request, "case _ => ()")
            .unwrap_err();
        assert!(matches!(err, CompileError::Malformed { .. }));
        insta::assert_snapshot!(err.message(), @"exhaustiveness scope {String} is not part of {Int, Bool}");
    }

    #[test]
    fn test_handler_must_be_case_block() {
        let env = env();
        let config = CheckConfig::default();
        let checker = UnionChecker::new(&env, &Permissive, &config);
        for source in ["handle;", "3;"] {
            let err = checker
                .check_partial_function(&ty(&env, "Int"), &handler(source), &exhaustive())
                .unwrap_err();
            assert_eq!(
                err.message(),
                "`match` must be used with a partial-function literal syntax"
            );
        }
    }

    #[test]
    fn test_malformed_pattern_aborts() {
        let env = env();
        let err = run_with(
            &env,
            &Permissive,
            &CheckConfig::default(),
            "Int",
            MatchRequest::default(),
            "case true => () case Cons(x) => ()",
        )
        .unwrap_err();
        assert_eq!(err.message(), "pattern not recognized: `Cons(x)`");
    }

    #[test]
    fn test_oracle_sees_renamed_groups() {
        let env = env();
        let oracle = Recording::default();
        let cases = "case x @ Some(y) => x case 1 | \"a\" => () case s: String => s";
        run_with(&env, &oracle, &CheckConfig::default(), "Option[Int] | Int | String", exhaustive(), cases)
            .unwrap();
        assert_eq!(
            oracle.groups.into_inner(),
            vec![
                ("Option[Int]".to_string(), vec!["x$1 @ Some(y$2)".to_string()]),
                ("Int".to_string(), vec!["1".to_string()]),
                ("String".to_string(), vec!["\"a\"".to_string(), "s$3: String".to_string()]),
            ]
        );
    }

    // ============================================
    // Literal refinement
    // ============================================

    #[test]
    fn test_refinement_finds_missing_enum_member() {
        let missing = permissive(
            "Color",
            &CheckConfig::default(),
            "case Color.Red => () case Color.Green => ()",
        );
        insta::assert_snapshot!(
            missing.join("\n"),
            @"match may not be exhaustive for Color. It would fail on the following input: Color.Blue"
        );
    }

    #[test]
    fn test_refinement_can_be_disabled() {
        let config = CheckConfig::default().refine_literals(false);
        assert!(permissive("Color", &config, "case Color.Red => ()").is_empty());
    }

    #[test]
    fn test_refinement_of_complete_literal_range() {
        let config = CheckConfig::default();
        assert!(permissive("Bool", &config, "case true => () case false => ()").is_empty());
        assert!(permissive("Color.Red", &config, "case Color.Red => ()").is_empty());
        assert!(permissive("Option[Nothing] | Bool", &config, "case None => () case false | true => ()").is_empty());
    }

    #[test]
    fn test_refinement_of_infinite_range() {
        let missing = permissive("Int", &CheckConfig::default(), "case 1 => () case Max => ()");
        insta::assert_snapshot!(
            missing.join("\n"),
            @"match may not be exhaustive for Int. It would fail on the following input: _: Int (literal patterns cannot cover Int, this may be a false negative)"
        );
    }

    #[test]
    fn test_refinement_skipped_with_wildcards() {
        let config = CheckConfig::default();
        assert!(permissive("Int", &config, "case 1 => () case _ => ()").is_empty());
        assert!(permissive("Color", &config, "case Color.Red => () case c => ()").is_empty());
    }

    #[test]
    fn test_refinement_skipped_for_partly_constant_alternation() {
        assert!(messages("Bool", exhaustive(), "case (true | b): Bool => ()").is_empty());
        assert!(messages("Int", exhaustive(), "case (1 | n): Int => ()").is_empty());
        assert!(messages("Color", exhaustive(), "case (Color.Red | c): Color => ()").is_empty());
        let config = CheckConfig::default();
        assert!(permissive("Bool", &config, "case (true | b): Bool => ()").is_empty());
        assert!(permissive("Color", &config, "case Color.Blue => () case (Color.Red | c): Color => ()").is_empty());
    }

    #[test]
    fn test_refinement_of_constant_alternation() {
        let missing = permissive(
            "Color",
            &CheckConfig::default(),
            "case (Color.Red | Color.Green): Color => ()",
        );
        assert_eq!(
            missing,
            vec!["match may not be exhaustive for Color. It would fail on the following input: Color.Blue"]
        );
    }

    #[test]
    fn test_refinement_skips_structural_members() {
        let config = CheckConfig::default();
        assert!(permissive("Option[Int]", &config, "case Some(1) => ()").is_empty());
    }

    #[test]
    fn test_checks_are_idempotent() {
        let cases = "case true => () case Color.Red => () case Some(x) => ()";
        let union = "Option[Int] | Color | Bool";
        let request = MatchRequest::default().total(true).exhaustive(true);
        let first = messages(union, request.clone(), cases);
        let second = messages(union, request, cases);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
