//! Structural pattern exhaustiveness
//!
//! Implements the "usefulness" algorithm over deconstructed patterns and
//! reports witnesses for the values no row covers:
//! - unions split into one type case per member
//! - sealed types split into their data and object leaves
//! - `Bool` splits into its two literals, enums into their members
//! - `Int`, `String`, opaque types and `Any` have no finite signature;
//!   only wildcards and covering type tests exhaust them
//!
//! Algorithm based on Maranget, "Warnings for pattern matching" (2007).

use super::{Type, TypeEnv, TypeOracle};
use crate::ast::{Literal, Pattern, Spanned};
use crate::error::Result;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Upper bound on witnesses collected per matrix
const MAX_WITNESSES: usize = 32;

/// Pluggable exhaustiveness procedure
pub trait ExhaustivenessOracle {
    /// Values of `scrutinee` matched by none of `cases`, rendered as patterns.
    /// Empty when the cases are exhaustive.
    fn counterexamples(&self, scrutinee: &Type, cases: &[Spanned<Pattern>]) -> Result<Vec<String>>;
}

/// Constructor of a scrutinee type's signature
#[derive(Debug, Clone, PartialEq)]
enum Constructor {
    /// One member of a union
    TypeCase(Type),
    Literal(Literal),
    /// Enum member or object
    Value(String),
    /// Data constructor at its instantiated type
    Class(String, Type),
}

/// Deconstructed pattern for analysis
#[derive(Debug, Clone, PartialEq)]
enum DeconstructedPattern {
    Wildcard,
    TypeTest(Type),
    Literal(Literal),
    Value(String),
    Class {
        name: String,
        fields: Vec<DeconstructedPattern>,
    },
    Or(Vec<DeconstructedPattern>),
    /// Extractors and sequence shapes the checker cannot see through
    Opaque,
}

type Row = Vec<DeconstructedPattern>;

/// A value no row matches
#[derive(Debug, Clone, PartialEq)]
enum Witness {
    Wildcard,
    TypeTest(Type),
    Literal(Literal),
    Value(String),
    Class(String, Vec<Witness>),
}

impl std::fmt::Display for Witness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Witness::Wildcard => write!(f, "_"),
            Witness::TypeTest(ty) => write!(f, "_: {ty}"),
            Witness::Literal(lit) => write!(f, "{lit}"),
            Witness::Value(path) => write!(f, "{path}"),
            Witness::Class(name, fields) => {
                write!(f, "{name}(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Exhaustiveness oracle backed by the declaration environment
pub struct StructuralOracle<'a> {
    env: &'a TypeEnv,
}

impl<'a> StructuralOracle<'a> {
    pub fn new(env: &'a TypeEnv) -> Self {
        Self { env }
    }

    fn deconstruct(&self, pattern: &Pattern) -> Result<DeconstructedPattern> {
        Ok(match pattern {
            Pattern::Wildcard | Pattern::Var(_) => DeconstructedPattern::Wildcard,
            Pattern::Literal(lit) => DeconstructedPattern::Literal(lit.clone()),
            Pattern::Ref(path) => match self.env.value_type(path) {
                Some(Type::Literal(lit)) => DeconstructedPattern::Literal(lit),
                Some(Type::Named { name, .. }) => DeconstructedPattern::Value(name),
                _ => DeconstructedPattern::Wildcard,
            },
            Pattern::Bind { pattern, .. } | Pattern::Star(pattern) => {
                self.deconstruct(&pattern.node)?
            }
            Pattern::Typed { pattern, ty } => {
                let inner = self.deconstruct(&pattern.node)?;
                if inner == DeconstructedPattern::Wildcard {
                    DeconstructedPattern::TypeTest(self.env.resolve_type_expr(ty)?)
                } else {
                    inner
                }
            }
            Pattern::Apply { head, args } => match self.env.ctor(&head.node) {
                Some(ctor) => {
                    let repeated = ctor.fields.last().is_some_and(|f| f.repeated);
                    if args.len() != ctor.fields.len() {
                        return Ok(DeconstructedPattern::Opaque);
                    }
                    let mut fields = Vec::with_capacity(args.len());
                    for (i, arg) in args.iter().enumerate() {
                        let last = i + 1 == args.len();
                        if repeated && last {
                            // Only a trailing `_*` covers every sequence length
                            match &arg.node {
                                Pattern::Star(inner) if inner.node.is_irrefutable() => {
                                    fields.push(DeconstructedPattern::Wildcard)
                                }
                                _ => return Ok(DeconstructedPattern::Opaque),
                            }
                        } else {
                            fields.push(self.deconstruct(&arg.node)?);
                        }
                    }
                    DeconstructedPattern::Class {
                        name: head.node.clone(),
                        fields,
                    }
                }
                None => DeconstructedPattern::Opaque,
            },
            Pattern::Alt(alts) => DeconstructedPattern::Or(
                alts.iter()
                    .map(|a| self.deconstruct(&a.node))
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }

    /// Complete constructor signature of `ty`, or `None` for infinite types
    fn signature(&self, ty: &Type) -> Option<Vec<Constructor>> {
        let ty = self.env.dealias(ty);
        match &ty {
            Type::Nothing => Some(Vec::new()),
            Type::Union(..) => {
                let mut members = Vec::new();
                self.flatten(&ty, &mut members);
                Some(members.into_iter().map(Constructor::TypeCase).collect())
            }
            Type::Literal(lit) => Some(vec![Constructor::Literal(lit.clone())]),
            Type::Named { name, .. } => {
                use super::env::DeclKind;
                match self.env.kind(name)? {
                    DeclKind::Builtin if name == "Bool" => Some(vec![
                        Constructor::Literal(Literal::Bool(true)),
                        Constructor::Literal(Literal::Bool(false)),
                    ]),
                    DeclKind::Enum => Some(
                        self.env
                            .enum_members(name)?
                            .iter()
                            .map(|m| Constructor::Value(m.clone()))
                            .collect(),
                    ),
                    DeclKind::EnumMember | DeclKind::Object => {
                        Some(vec![Constructor::Value(name.clone())])
                    }
                    DeclKind::Sealed => Some(
                        self.env
                            .sealed_children(name)?
                            .iter()
                            .map(|child| match self.env.kind(child) {
                                Some(DeclKind::Object) => Constructor::Value(child.clone()),
                                _ => Constructor::Class(
                                    child.clone(),
                                    self.env.instantiate_child(child, &ty),
                                ),
                            })
                            .collect(),
                    ),
                    DeclKind::Data => Some(vec![Constructor::Class(name.clone(), ty.clone())]),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn is_uninhabited(&self, ty: &Type) -> bool {
        self.signature(ty).is_some_and(|ctors| ctors.is_empty())
    }

    fn flatten(&self, ty: &Type, out: &mut Vec<Type>) {
        match self.env.dealias(ty) {
            Type::Union(left, right) => {
                self.flatten(&left, out);
                self.flatten(&right, out);
            }
            other => {
                if !out.contains(&other) {
                    out.push(other);
                }
            }
        }
    }

    fn ctor_type(&self, ctor: &Constructor) -> Type {
        match ctor {
            Constructor::TypeCase(ty) | Constructor::Class(_, ty) => ty.clone(),
            Constructor::Literal(lit) => Type::Literal(lit.clone()),
            Constructor::Value(path) => Type::named(path.clone()),
        }
    }

    fn field_types(&self, ctor: &Constructor) -> Vec<Type> {
        match ctor {
            Constructor::TypeCase(ty) => vec![ty.clone()],
            Constructor::Literal(_) | Constructor::Value(_) => Vec::new(),
            Constructor::Class(_, ty) => self
                .env
                .ctor_fields(ty)
                .unwrap_or_default()
                .into_iter()
                .map(|f| f.ty)
                .collect(),
        }
    }

    /// True if values built by data constructor `name` can inhabit `ty`
    fn class_fits(&self, name: &str, ty: &Type) -> bool {
        match self.env.dealias(ty) {
            Type::Any | Type::NoType => true,
            Type::Union(left, right) => self.class_fits(name, &left) || self.class_fits(name, &right),
            target => {
                let Some(target) = target.name() else {
                    return false;
                };
                let mut current = Some(Type::named(name));
                while let Some(ty) = current {
                    if ty.name() == Some(target) {
                        return true;
                    }
                    current = self.env.base_type(&ty);
                }
                false
            }
        }
    }

    /// Sub-patterns of `head` for the values built by `ctor`, or `None`
    /// when the head cannot match them
    fn specialize(&self, head: &DeconstructedPattern, ctor: &Constructor) -> Option<Row> {
        let arity = self.field_types(ctor).len();
        let wilds = || vec![DeconstructedPattern::Wildcard; arity];
        match (head, ctor) {
            (DeconstructedPattern::Wildcard, _) => Some(wilds()),
            (DeconstructedPattern::TypeTest(t), _) => {
                if self.env.is_subtype(&self.ctor_type(ctor), t) {
                    Some(wilds())
                } else if let Constructor::TypeCase(member) = ctor {
                    self.env.is_subtype(t, member).then(|| vec![head.clone()])
                } else {
                    None
                }
            }
            (DeconstructedPattern::Opaque, _) | (DeconstructedPattern::Or(_), _) => None,
            (_, Constructor::TypeCase(member)) => {
                let fits = match head {
                    DeconstructedPattern::Literal(lit) => {
                        self.env.is_subtype(&Type::Literal(lit.clone()), member)
                    }
                    DeconstructedPattern::Value(path) => {
                        self.env.is_subtype(&Type::named(path.clone()), member)
                    }
                    DeconstructedPattern::Class { name, .. } => self.class_fits(name, member),
                    _ => false,
                };
                fits.then(|| vec![head.clone()])
            }
            (DeconstructedPattern::Literal(a), Constructor::Literal(b)) => {
                (a == b).then(Vec::new)
            }
            (DeconstructedPattern::Value(a), Constructor::Value(b)) => (a == b).then(Vec::new),
            (DeconstructedPattern::Class { name, fields }, Constructor::Class(ctor_name, _)) => {
                (name == ctor_name && fields.len() == arity).then(|| fields.clone())
            }
            _ => None,
        }
    }

    /// Replace or-pattern heads by one row per alternative
    fn expand_or_heads(rows: &[Row]) -> Vec<Row> {
        let mut expanded = Vec::with_capacity(rows.len());
        for row in rows {
            match row.first() {
                Some(DeconstructedPattern::Or(alts)) => {
                    let alt_rows: Vec<Row> = alts
                        .iter()
                        .map(|alt| {
                            let mut r = Vec::with_capacity(row.len());
                            r.push(alt.clone());
                            r.extend_from_slice(&row[1..]);
                            r
                        })
                        .collect();
                    expanded.extend(Self::expand_or_heads(&alt_rows));
                }
                _ => expanded.push(row.clone()),
            }
        }
        expanded
    }

    /// Witness vectors for the values of `tys` that no row matches
    fn missing(&self, rows: &[Row], tys: &[Type]) -> Vec<Vec<Witness>> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            if rows.is_empty() {
                if tys.iter().any(|t| self.is_uninhabited(t)) {
                    return Vec::new();
                }
                return vec![vec![Witness::Wildcard; tys.len()]];
            }
            let Some((ty, rest)) = tys.split_first() else {
                return Vec::new();
            };
            let rows = Self::expand_or_heads(rows);

            let signature = self.signature(ty);
            let named: Vec<&Constructor> = match &signature {
                Some(ctors) => ctors
                    .iter()
                    .filter(|c| {
                        rows.iter().any(|row| {
                            !matches!(row[0], DeconstructedPattern::Wildcard)
                                && self.specialize(&row[0], c).is_some()
                        })
                    })
                    .collect(),
                None => Vec::new(),
            };

            if let Some(ctors) = &signature {
                if named.len() == ctors.len() {
                    let mut witnesses = Vec::new();
                    for ctor in ctors {
                        witnesses.extend(self.missing_for(&rows, ctor, rest));
                        if witnesses.len() >= MAX_WITNESSES {
                            break;
                        }
                    }
                    witnesses.truncate(MAX_WITNESSES);
                    return witnesses;
                }
            }

            // Incomplete signature: only rows covering the whole column help
            let default: Vec<Row> = rows
                .iter()
                .filter(|row| match &row[0] {
                    DeconstructedPattern::Wildcard => true,
                    DeconstructedPattern::TypeTest(t) => self.env.is_subtype(ty, t),
                    _ => false,
                })
                .map(|row| row[1..].to_vec())
                .collect();
            let tails = self.missing(&default, rest);
            if tails.is_empty() {
                return Vec::new();
            }

            let heads: Vec<Witness> = match &signature {
                Some(ctors) => ctors
                    .iter()
                    .filter(|c| !named.contains(c))
                    .map(|c| self.wrap(c, vec![Witness::Wildcard; self.field_types(c).len()]))
                    .collect(),
                None => vec![Witness::Wildcard],
            };
            let mut witnesses = Vec::new();
            'outer: for head in &heads {
                for tail in &tails {
                    let mut w = Vec::with_capacity(tys.len());
                    w.push(head.clone());
                    w.extend(tail.iter().cloned());
                    witnesses.push(w);
                    if witnesses.len() >= MAX_WITNESSES {
                        break 'outer;
                    }
                }
            }
            witnesses
        })
    }

    fn missing_for(&self, rows: &[Row], ctor: &Constructor, rest: &[Type]) -> Vec<Vec<Witness>> {
        let field_tys = self.field_types(ctor);
        let arity = field_tys.len();
        let specialized: Vec<Row> = rows
            .iter()
            .filter_map(|row| {
                let mut fields = self.specialize(&row[0], ctor)?;
                fields.extend_from_slice(&row[1..]);
                Some(fields)
            })
            .collect();
        let mut tys = field_tys;
        tys.extend_from_slice(rest);
        self.missing(&specialized, &tys)
            .into_iter()
            .map(|mut w| {
                let tail = w.split_off(arity);
                let mut out = Vec::with_capacity(tail.len() + 1);
                out.push(self.wrap(ctor, w));
                out.extend(tail);
                out
            })
            .collect()
    }

    fn wrap(&self, ctor: &Constructor, fields: Vec<Witness>) -> Witness {
        match ctor {
            Constructor::TypeCase(ty) => match fields.into_iter().next() {
                Some(Witness::Wildcard) | None => Witness::TypeTest(ty.clone()),
                Some(inner) => inner,
            },
            Constructor::Literal(lit) => Witness::Literal(lit.clone()),
            Constructor::Value(path) => Witness::Value(path.clone()),
            Constructor::Class(name, _) => Witness::Class(name.clone(), fields),
        }
    }
}

impl ExhaustivenessOracle for StructuralOracle<'_> {
    fn counterexamples(&self, scrutinee: &Type, cases: &[Spanned<Pattern>]) -> Result<Vec<String>> {
        let rows = cases
            .iter()
            .map(|case| Ok(vec![self.deconstruct(&case.node)?]))
            .collect::<Result<Vec<Row>>>()?;
        let mut rendered: Vec<String> = Vec::new();
        for witness in self.missing(&rows, std::slice::from_ref(scrutinee)) {
            if let Some(w) = witness.first() {
                let text = w.to_string();
                if !rendered.contains(&text) {
                    rendered.push(text);
                }
            }
        }
        tracing::trace!(%scrutinee, cases = cases.len(), missing = rendered.len(), "structural check");
        Ok(rendered)
    }
}
