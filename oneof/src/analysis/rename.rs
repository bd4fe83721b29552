//! Fresh bind names for patterns handed to the exhaustiveness oracle

use std::collections::HashSet;

use crate::ast::{CaseBody, CaseClause, Pattern, Spanned};

/// Generator of names that clash with nothing used in a case block
#[derive(Debug, Default)]
pub struct FreshNames {
    used: HashSet<String>,
    counter: usize,
}

impl FreshNames {
    /// Reserve every name mentioned by the clauses, patterns and bodies alike
    pub fn for_clauses(clauses: &[CaseClause]) -> Self {
        let mut names = Self::default();
        for clause in clauses {
            names.reserve_pattern(&clause.pattern.node);
            if let CaseBody::Path(path) = &clause.body.node {
                names.used.insert(path.clone());
            }
        }
        names
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// Next unused name derived from `base`: `base$1`, `base$2`, ...
    pub fn fresh(&mut self, base: &str) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("{base}${}", self.counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn reserve_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Var(name) | Pattern::Ref(name) => self.reserve(name.clone()),
            Pattern::Bind { name, pattern } => {
                self.reserve(name.node.clone());
                self.reserve_pattern(&pattern.node);
            }
            Pattern::Typed { pattern, .. } | Pattern::Star(pattern) => {
                self.reserve_pattern(&pattern.node)
            }
            Pattern::Apply { head, args } => {
                self.reserve(head.node.clone());
                for arg in args {
                    self.reserve_pattern(&arg.node);
                }
            }
            Pattern::Alt(alts) => {
                for alt in alts {
                    self.reserve_pattern(&alt.node);
                }
            }
            Pattern::Wildcard | Pattern::Literal(_) => {}
        }
    }
}

/// Isomorphic copy of `pattern` with every bound name replaced by a fresh one
pub fn rename_binds(pattern: &Spanned<Pattern>, names: &mut FreshNames) -> Spanned<Pattern> {
    let node = match &pattern.node {
        Pattern::Var(name) => Pattern::Var(names.fresh(name)),
        Pattern::Bind { name, pattern: inner } => Pattern::Bind {
            name: Spanned::new(names.fresh(&name.node), name.span),
            pattern: Box::new(rename_binds(inner, names)),
        },
        Pattern::Typed { pattern: inner, ty } => Pattern::Typed {
            pattern: Box::new(rename_binds(inner, names)),
            ty: ty.clone(),
        },
        Pattern::Star(inner) => Pattern::Star(Box::new(rename_binds(inner, names))),
        Pattern::Apply { head, args } => Pattern::Apply {
            head: head.clone(),
            args: args.iter().map(|a| rename_binds(a, names)).collect(),
        },
        Pattern::Alt(alts) => Pattern::Alt(alts.iter().map(|a| rename_binds(a, names)).collect()),
        Pattern::Wildcard | Pattern::Ref(_) | Pattern::Literal(_) => pattern.node.clone(),
    };
    Spanned::new(node, pattern.span)
}
