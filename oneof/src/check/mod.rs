//! Program checker
//!
//! Registers the declarations of a program, then runs every `check` and
//! `match` item against them. Coverage diagnostics from all items are
//! collected; any other error aborts the run.

use crate::analysis::{MatchRequest, UnionChecker};
use crate::ast::{Check, CheckKind, Item, Program, Spanned};
use crate::config::CheckConfig;
use crate::error::{CompileError, Diagnostic, Result};
use crate::types::{StructuralOracle, TypeEnv, TypeOracle};

/// Checks whole programs
pub struct Checker {
    env: TypeEnv,
    config: CheckConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Self {
        Self {
            env: TypeEnv::new(),
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Declarations registered by the last run
    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Diagnostics reported by the last run
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check every item of `program`. Each run starts from a fresh
    /// environment, so checking the same program twice reports the same
    /// diagnostics.
    pub fn check_program(&mut self, program: &Program) -> Result<()> {
        self.env = TypeEnv::new();
        self.diagnostics.clear();
        self.env.register_program(program)?;

        let oracle = StructuralOracle::new(&self.env);
        let checker = UnionChecker::new(&self.env, &oracle, &self.config);
        let mut diagnostics = Vec::new();
        let mut checks = 0;
        for item in &program.items {
            let Item::Check(check) = item else {
                continue;
            };
            checks += 1;
            match run_check(&self.env, &checker, check) {
                Ok(()) => {}
                Err(CompileError::Check { diagnostics: found }) => diagnostics.extend(found),
                Err(e) => return Err(e),
            }
        }
        tracing::debug!(checks, diagnostics = diagnostics.len(), "checked program");

        self.diagnostics = diagnostics;
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(CompileError::check(self.diagnostics.clone()))
        }
    }
}

fn run_check(env: &TypeEnv, checker: &UnionChecker<'_>, check: &Check) -> Result<()> {
    match &check.kind {
        CheckKind::PartOf { candidate, union } => checker.check_is_part_of(
            &env.resolve_type_expr(candidate)?,
            &env.resolve_type_expr(union)?,
            candidate.span,
        ),
        CheckKind::ContainsSomeOf { smaller, bigger } => checker.check_contains_some_of(
            &env.resolve_type_expr(smaller)?,
            &env.resolve_type_expr(bigger)?,
            check.span,
        ),
        CheckKind::ContainsAllOf { left, right } => checker.check_contains_all_of(
            &env.resolve_type_expr(left)?,
            &env.resolve_type_expr(right)?,
            check.span,
        ),
        CheckKind::Match {
            union,
            total,
            exhaustive,
            handler,
        } => {
            let union = env.resolve_type_expr(union)?;
            let mut request = MatchRequest::default().total(*total);
            if let Some(mode) = exhaustive {
                request = match &mode.scope {
                    Some(scope) => request.within(Spanned::new(
                        env.resolve_type_expr(scope)?,
                        scope.span,
                    )),
                    None => request.exhaustive(true),
                };
            }
            checker
                .check_partial_function(&union, handler, &request)
                .map(|_| ())
        }
    }
}
