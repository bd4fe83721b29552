//! Type environment for `.oneof` declarations
//!
//! Registration runs in two phases: every name is declared first, then
//! bodies (alias targets, fields, parents, extractor scrutinees) are resolved,
//! so declarations may refer to each other in any order.

use std::collections::{HashMap, HashSet};

use super::{
    CtorSig, ExtractorSig, FieldSig, PatternHead, Type, TypeOracle, TypeParam, ValueRange,
};
use crate::ast::{Item, Literal, Program, Span, Spanned, TypeExpr, TypeParamDecl};
use crate::error::{CompileError, Result};
use crate::util::{closest_name, suggestion_hint};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Expansion bound for alias chains; cycles are rejected at registration
const MAX_ALIAS_DEPTH: usize = 64;

/// Kind of a declared type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Builtin,
    Opaque,
    Alias,
    Enum,
    EnumMember,
    Sealed,
    Data,
    Object,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeclKind::Builtin => "builtin type",
            DeclKind::Opaque => "type",
            DeclKind::Alias => "alias",
            DeclKind::Enum => "enum",
            DeclKind::EnumMember => "enum member",
            DeclKind::Sealed => "sealed type",
            DeclKind::Data => "data type",
            DeclKind::Object => "object",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
enum TypeDef {
    Builtin,
    Opaque { params: Vec<TypeParam> },
    Alias { params: Vec<TypeParam>, target: Type },
    Enum { members: Vec<String> },
    EnumMember { parent: String },
    Sealed { params: Vec<TypeParam>, children: Vec<String> },
    Data { ctor: CtorSig, parent: Option<Type> },
    Object { parent: Option<Type> },
}

impl TypeDef {
    fn params(&self) -> &[TypeParam] {
        match self {
            TypeDef::Opaque { params }
            | TypeDef::Alias { params, .. }
            | TypeDef::Sealed { params, .. } => params,
            TypeDef::Data { ctor, .. } => &ctor.type_params,
            TypeDef::Builtin
            | TypeDef::Enum { .. }
            | TypeDef::EnumMember { .. }
            | TypeDef::Object { .. } => &[],
        }
    }

    fn kind(&self) -> DeclKind {
        match self {
            TypeDef::Builtin => DeclKind::Builtin,
            TypeDef::Opaque { .. } => DeclKind::Opaque,
            TypeDef::Alias { .. } => DeclKind::Alias,
            TypeDef::Enum { .. } => DeclKind::Enum,
            TypeDef::EnumMember { .. } => DeclKind::EnumMember,
            TypeDef::Sealed { .. } => DeclKind::Sealed,
            TypeDef::Data { .. } => DeclKind::Data,
            TypeDef::Object { .. } => DeclKind::Object,
        }
    }
}

/// The host type system: declared types, stable values and extractors
#[derive(Debug, Clone)]
pub struct TypeEnv {
    types: HashMap<String, TypeDef>,
    /// Declaration order, used for suggestions
    order: Vec<String>,
    spans: HashMap<String, Span>,
    values: HashMap<String, Type>,
    extractors: HashMap<String, ExtractorSig>,
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv {
    pub fn new() -> Self {
        let mut env = Self {
            types: HashMap::new(),
            order: Vec::new(),
            spans: HashMap::new(),
            values: HashMap::new(),
            extractors: HashMap::new(),
        };
        for name in ["Any", "Nothing", "Int", "String", "Bool", "Unit"] {
            env.types.insert(name.to_string(), TypeDef::Builtin);
            env.order.push(name.to_string());
        }
        env
    }

    /// Register every declaration of `program`
    pub fn register_program(&mut self, program: &Program) -> Result<()> {
        for item in &program.items {
            self.declare_item(item)?;
        }
        for item in &program.items {
            self.define_item(item)?;
        }
        self.check_alias_cycles()?;
        tracing::debug!(
            types = self.order.len(),
            values = self.values.len(),
            extractors = self.extractors.len(),
            "registered declarations"
        );
        Ok(())
    }

    pub fn kind(&self, name: &str) -> Option<DeclKind> {
        self.types.get(name).map(TypeDef::kind)
    }

    /// Direct children of a sealed type, in declaration order
    pub fn sealed_children(&self, name: &str) -> Option<&[String]> {
        match self.types.get(name) {
            Some(TypeDef::Sealed { children, .. }) => Some(children),
            _ => None,
        }
    }

    /// Member paths of an enum, in declaration order
    pub fn enum_members(&self, name: &str) -> Option<&[String]> {
        match self.types.get(name) {
            Some(TypeDef::Enum { members }) => Some(members),
            _ => None,
        }
    }

    pub fn ctor(&self, name: &str) -> Option<&CtorSig> {
        match self.types.get(name) {
            Some(TypeDef::Data { ctor, .. }) => Some(ctor),
            _ => None,
        }
    }

    /// Constructor fields of an applied data type, parameters substituted
    pub fn ctor_fields(&self, ty: &Type) -> Option<Vec<FieldSig>> {
        let Type::Named { name, args } = ty else {
            return None;
        };
        let ctor = self.ctor(name)?;
        let subst = bind_params(&ctor.type_params, args);
        Some(
            ctor.fields
                .iter()
                .map(|f| FieldSig {
                    name: f.name.clone(),
                    ty: f.ty.substitute(&subst),
                    repeated: f.repeated,
                })
                .collect(),
        )
    }

    /// Instantiate the sealed child `child` as a subtype of `parent`.
    /// Child parameters not fixed by the parent become `Any`.
    pub fn instantiate_child(&self, child: &str, parent: &Type) -> Type {
        let (params, declared_parent) = match self.types.get(child) {
            Some(TypeDef::Data { ctor, parent }) => (ctor.type_params.as_slice(), parent.as_ref()),
            Some(TypeDef::Object { parent }) => (&[][..], parent.as_ref()),
            _ => return Type::named(child),
        };
        let mut subst = HashMap::new();
        if let Some(declared) = declared_parent {
            unify(declared, parent, &mut subst);
        }
        Type::applied(
            child,
            params
                .iter()
                .map(|p| subst.get(&p.name).cloned().unwrap_or(Type::Any))
                .collect(),
        )
    }

    // ============================================
    // Registration
    // ============================================

    fn declare(&mut self, name: &Spanned<String>, def: TypeDef) -> Result<()> {
        if self.types.contains_key(&name.node) {
            return Err(CompileError::type_error(
                format!("duplicate declaration `{}`", name.node),
                name.span,
            ));
        }
        self.types.insert(name.node.clone(), def);
        self.order.push(name.node.clone());
        self.spans.insert(name.node.clone(), name.span);
        Ok(())
    }

    fn declare_value(&mut self, name: &Spanned<String>, ty: Type) -> Result<()> {
        if self.values.contains_key(&name.node) {
            return Err(CompileError::type_error(
                format!("duplicate value `{}`", name.node),
                name.span,
            ));
        }
        self.values.insert(name.node.clone(), ty);
        Ok(())
    }

    fn declare_item(&mut self, item: &Item) -> Result<()> {
        match item {
            Item::Type(decl) => {
                let params = lower_params(&decl.params)?;
                self.declare(&decl.name, TypeDef::Opaque { params })
            }
            Item::Alias(decl) => {
                let params = lower_params(&decl.params)?;
                self.declare(
                    &decl.name,
                    TypeDef::Alias {
                        params,
                        target: Type::Nothing,
                    },
                )
            }
            Item::Enum(decl) => {
                let members: Vec<String> = decl
                    .members
                    .iter()
                    .map(|m| format!("{}.{}", decl.name.node, m.node))
                    .collect();
                self.declare(
                    &decl.name,
                    TypeDef::Enum {
                        members: members.clone(),
                    },
                )?;
                for (member, path) in decl.members.iter().zip(members) {
                    let spanned = Spanned::new(path.clone(), member.span);
                    self.declare(
                        &spanned,
                        TypeDef::EnumMember {
                            parent: decl.name.node.clone(),
                        },
                    )?;
                    self.declare_value(&spanned, Type::named(path))?;
                }
                Ok(())
            }
            Item::Sealed(decl) => {
                let params = lower_params(&decl.params)?;
                self.declare(
                    &decl.name,
                    TypeDef::Sealed {
                        params,
                        children: Vec::new(),
                    },
                )
            }
            Item::Data(decl) => {
                let type_params = lower_params(&decl.params)?;
                let ctor = CtorSig {
                    name: decl.name.node.clone(),
                    type_params,
                    fields: Vec::new(),
                };
                self.declare(&decl.name, TypeDef::Data { ctor, parent: None })
            }
            Item::Object(decl) => {
                self.declare(&decl.name, TypeDef::Object { parent: None })?;
                self.declare_value(&decl.name, Type::named(decl.name.node.clone()))
            }
            Item::Const(decl) => {
                self.declare_value(&decl.name, Type::Literal(decl.value.node.clone()))
            }
            Item::Extractor(decl) => {
                if self.extractors.contains_key(&decl.name.node) {
                    return Err(CompileError::type_error(
                        format!("duplicate extractor `{}`", decl.name.node),
                        decl.name.span,
                    ));
                }
                let type_params = lower_params(&decl.params)?;
                self.extractors.insert(
                    decl.name.node.clone(),
                    ExtractorSig {
                        name: decl.name.node.clone(),
                        type_params,
                        scrutinee: Type::Nothing,
                    },
                );
                Ok(())
            }
            Item::Check(_) => Ok(()),
        }
    }

    fn define_item(&mut self, item: &Item) -> Result<()> {
        match item {
            Item::Alias(decl) => {
                let scope = param_names(&decl.params);
                let resolved = self.resolve_in(&decl.target, &scope)?;
                if let Some(TypeDef::Alias { target, .. }) = self.types.get_mut(&decl.name.node) {
                    *target = resolved;
                }
                Ok(())
            }
            Item::Data(decl) => {
                let scope = param_names(&decl.params);
                let mut fields = Vec::with_capacity(decl.fields.len());
                for (i, field) in decl.fields.iter().enumerate() {
                    if field.repeated && i + 1 != decl.fields.len() {
                        return Err(CompileError::type_error(
                            format!(
                                "only the last field of `{}` may be repeated",
                                decl.name.node
                            ),
                            field.name.span,
                        ));
                    }
                    fields.push(FieldSig {
                        name: field.name.node.clone(),
                        ty: self.resolve_in(&field.ty, &scope)?,
                        repeated: field.repeated,
                    });
                }
                let parent = match &decl.parent {
                    Some(parent) => Some(self.resolve_parent(&decl.name.node, parent, &scope)?),
                    None => None,
                };
                if let Some(TypeDef::Data { ctor, parent: p }) =
                    self.types.get_mut(&decl.name.node)
                {
                    ctor.fields = fields;
                    *p = parent;
                }
                Ok(())
            }
            Item::Object(decl) => {
                let parent = match &decl.parent {
                    Some(parent) => Some(self.resolve_parent(&decl.name.node, parent, &[])?),
                    None => None,
                };
                if let Some(TypeDef::Object { parent: p }) = self.types.get_mut(&decl.name.node) {
                    *p = parent;
                }
                Ok(())
            }
            Item::Extractor(decl) => {
                let scope = param_names(&decl.params);
                let resolved = self.resolve_in(&decl.scrutinee, &scope)?;
                if let Some(sig) = self.extractors.get_mut(&decl.name.node) {
                    sig.scrutinee = resolved;
                }
                Ok(())
            }
            Item::Type(_)
            | Item::Enum(_)
            | Item::Sealed(_)
            | Item::Const(_)
            | Item::Check(_) => Ok(()),
        }
    }

    /// Resolve an `extends` clause and record `child` under a sealed parent
    fn resolve_parent(
        &mut self,
        child: &str,
        parent: &Spanned<TypeExpr>,
        scope: &[String],
    ) -> Result<Type> {
        let resolved = self.resolve_in(parent, scope)?;
        let dealiased = self.dealias(&resolved);
        let Some(name) = dealiased.name().map(str::to_string) else {
            return Err(CompileError::type_error(
                format!("`{child}` cannot extend `{resolved}`"),
                parent.span,
            ));
        };
        match self.types.get_mut(&name) {
            Some(TypeDef::Sealed { children, .. }) => {
                children.push(child.to_string());
                Ok(dealiased)
            }
            Some(TypeDef::Opaque { .. }) => Ok(dealiased),
            Some(def) => Err(CompileError::type_error(
                format!("`{child}` cannot extend {} `{name}`", def.kind()),
                parent.span,
            )),
            None => Err(CompileError::type_error(
                format!("unknown type `{name}`"),
                parent.span,
            )),
        }
    }

    fn check_alias_cycles(&self) -> Result<()> {
        let mut done = HashSet::new();
        for name in &self.order {
            if matches!(self.types.get(name), Some(TypeDef::Alias { .. })) {
                let mut path = Vec::new();
                self.visit_alias(name, &mut path, &mut done)?;
            }
        }
        Ok(())
    }

    fn visit_alias(
        &self,
        name: &str,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
    ) -> Result<()> {
        if done.contains(name) {
            return Ok(());
        }
        if path.iter().any(|p| p == name) {
            let span = self.spans.get(name).copied().unwrap_or_default();
            return Err(CompileError::type_error(
                format!("cyclic alias `{name}`"),
                span,
            ));
        }
        path.push(name.to_string());
        if let Some(TypeDef::Alias { target, .. }) = self.types.get(name) {
            let mut refs = Vec::new();
            self.spine_aliases(target, &mut refs);
            for next in refs {
                self.visit_alias(&next, path, done)?;
            }
        }
        path.pop();
        done.insert(name.to_string());
        Ok(())
    }

    /// Aliases reachable without going through a type argument
    fn spine_aliases(&self, ty: &Type, out: &mut Vec<String>) {
        match ty {
            Type::Named { name, .. } if matches!(self.types.get(name), Some(TypeDef::Alias { .. })) => {
                out.push(name.clone());
            }
            Type::Union(left, right) => {
                self.spine_aliases(left, out);
                self.spine_aliases(right, out);
            }
            _ => {}
        }
    }

    fn resolve_in(&self, expr: &Spanned<TypeExpr>, scope: &[String]) -> Result<Type> {
        match &expr.node {
            TypeExpr::Path { name, args } => {
                if scope.iter().any(|p| p == name) {
                    if !args.is_empty() {
                        return Err(CompileError::type_error(
                            format!("type parameter `{name}` takes no type arguments"),
                            expr.span,
                        ));
                    }
                    return Ok(Type::Param(name.clone()));
                }
                let Some(def) = self.types.get(name) else {
                    let candidates = self
                        .order
                        .iter()
                        .chain(scope.iter())
                        .map(String::as_str);
                    let hint = suggestion_hint(closest_name(name, candidates, 2));
                    return Err(CompileError::type_error(
                        format!("unknown type `{name}`{hint}"),
                        expr.span,
                    ));
                };
                let expected = def.params().len();
                if args.len() != expected {
                    return Err(CompileError::type_error(
                        format!(
                            "`{name}` expects {expected} type argument(s), found {}",
                            args.len()
                        ),
                        expr.span,
                    ));
                }
                let args = args
                    .iter()
                    .map(|a| self.resolve_in(a, scope))
                    .collect::<Result<Vec<_>>>()?;
                Ok(match name.as_str() {
                    "Any" => Type::Any,
                    "Nothing" => Type::Nothing,
                    _ => Type::applied(name.clone(), args),
                })
            }
            TypeExpr::Literal(lit) => Ok(Type::Literal(lit.clone())),
            TypeExpr::Union(left, right) => Ok(Type::union(
                self.resolve_in(left, scope)?,
                self.resolve_in(right, scope)?,
            )),
        }
    }

    // ============================================
    // Relations
    // ============================================

    fn is_subtype_inner(&self, sub: &Type, sup: &Type) -> bool {
        if sub == sup {
            return true;
        }
        if matches!(sub, Type::NoType | Type::Nothing) || matches!(sup, Type::NoType | Type::Any) {
            return true;
        }
        let sub = self.dealias(sub);
        let sup = self.dealias(sup);
        if sub == sup {
            return true;
        }
        if let Type::Union(left, right) = &sub {
            return self.is_subtype(left, &sup) && self.is_subtype(right, &sup);
        }
        if let Type::Union(left, right) = &sup {
            return self.is_subtype(&sub, left) || self.is_subtype(&sub, right);
        }
        if let (
            Type::Named { name: a, args: a_args },
            Type::Named { name: b, args: b_args },
        ) = (&sub, &sup)
        {
            if a == b {
                return self.args_conform(a, a_args, b_args);
            }
        }
        match self.base_type(&sub) {
            Some(base) => self.is_subtype(&base, &sup),
            None => false,
        }
    }

    fn args_conform(&self, name: &str, sub_args: &[Type], sup_args: &[Type]) -> bool {
        if sub_args.len() != sup_args.len() {
            return false;
        }
        let params = self.types.get(name).map(TypeDef::params).unwrap_or(&[]);
        sub_args.iter().zip(sup_args).enumerate().all(|(i, (a, b))| {
            let covariant = params.get(i).is_some_and(|p| p.covariant);
            if covariant {
                self.is_subtype(a, b)
            } else {
                self.is_subtype(a, b) && self.is_subtype(b, a)
            }
        })
    }

    /// Join applications of the same constructor, argument by argument
    fn join_instances(&self, name: &str, views: &[Type]) -> Option<Type> {
        let first = views.first()?;
        if views.iter().all(|v| v == first) {
            return Some(first.clone());
        }
        let params = self.types.get(name).map(TypeDef::params).unwrap_or(&[]);
        let arity = params.len();
        let mut joined = Vec::with_capacity(arity);
        for (i, param) in params.iter().enumerate() {
            let column: Vec<Type> = views
                .iter()
                .filter_map(|v| match v {
                    Type::Named { args, .. } => args.get(i).cloned(),
                    _ => None,
                })
                .collect();
            if column.len() != views.len() {
                return None;
            }
            if column.iter().all(|t| *t == column[0]) {
                joined.push(column[0].clone());
            } else if param.covariant {
                joined.push(self.lub(&column));
            } else {
                return None;
            }
        }
        Some(Type::applied(name, joined))
    }
}

impl TypeOracle for TypeEnv {
    fn dealias(&self, ty: &Type) -> Type {
        let mut current = ty.clone();
        for _ in 0..MAX_ALIAS_DEPTH {
            let next = match &current {
                Type::Named { name, args } => match self.types.get(name) {
                    Some(TypeDef::Alias { params, target }) => {
                        target.substitute(&bind_params(params, args))
                    }
                    _ => return current,
                },
                _ => return current,
            };
            current = next;
        }
        current
    }

    fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.is_subtype_inner(sub, sup)
        })
    }

    fn widen(&self, ty: &Type) -> Type {
        match ty {
            Type::Literal(lit) => literal_base(lit),
            Type::Named { name, .. } => match self.types.get(name) {
                Some(TypeDef::EnumMember { parent }) => Type::named(parent.clone()),
                Some(TypeDef::Object { parent: Some(parent) }) => self.widen(parent),
                Some(TypeDef::Alias { .. }) => self.widen(&self.dealias(ty)),
                _ => ty.clone(),
            },
            Type::Union(left, right) => Type::union(self.widen(left), self.widen(right)),
            _ => ty.clone(),
        }
    }

    fn lub(&self, types: &[Type]) -> Type {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            let known: Vec<&Type> = types.iter().filter(|t| **t != Type::NoType).collect();
            let Some(first) = known.first() else {
                return Type::NoType;
            };
            if known.iter().all(|t| t == first) {
                return (*first).clone();
            }
            let mut widened: Vec<Type> = Vec::new();
            for ty in known.iter().filter(|t| ***t != Type::Nothing) {
                let w = self.widen(ty);
                if !widened.contains(&w) {
                    widened.push(w);
                }
            }
            match widened.len() {
                0 => return Type::Nothing,
                1 => return widened.remove(0),
                _ => {}
            }
            for candidate in &widened {
                if widened.iter().all(|t| self.is_subtype(t, candidate)) {
                    return candidate.clone();
                }
            }
            let mut head = Some(widened[0].clone());
            while let Some(candidate) = head {
                if let Some(name) = candidate.name() {
                    let views: Option<Vec<Type>> = widened
                        .iter()
                        .map(|t| self.as_instance_of(t, name))
                        .collect();
                    if let Some(joined) = views.and_then(|v| self.join_instances(name, &v)) {
                        return joined;
                    }
                }
                head = self.base_type(&candidate);
            }
            Type::union_of(widened)
        })
    }

    fn base_type(&self, ty: &Type) -> Option<Type> {
        match ty {
            Type::Literal(lit) => Some(literal_base(lit)),
            Type::Named { name, args } => match self.types.get(name)? {
                TypeDef::Data {
                    ctor,
                    parent: Some(parent),
                } => Some(parent.substitute(&bind_params(&ctor.type_params, args))),
                TypeDef::Object { parent } => parent.clone(),
                TypeDef::EnumMember { parent } => Some(Type::named(parent.clone())),
                TypeDef::Alias { .. } => Some(self.dealias(ty)),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_instance_of(&self, ty: &Type, name: &str) -> Option<Type> {
        let mut current = self.dealias(ty);
        for _ in 0..MAX_ALIAS_DEPTH {
            if current.name() == Some(name) {
                return Some(current);
            }
            current = self.base_type(&current)?;
        }
        None
    }

    fn pattern_head(&self, path: &str) -> Option<PatternHead> {
        if let Some(ctor) = self.ctor(path) {
            return Some(PatternHead::Constructor(ctor.clone()));
        }
        self.extractors
            .get(path)
            .map(|sig| PatternHead::Extractor(sig.clone()))
    }

    fn value_type(&self, path: &str) -> Option<Type> {
        self.values.get(path).cloned()
    }

    fn value_range(&self, ty: &Type) -> ValueRange {
        let ty = self.dealias(ty);
        match &ty {
            Type::Nothing => ValueRange::Finite(Vec::new()),
            Type::Any | Type::NoType | Type::Param(_) => ValueRange::Infinite,
            Type::Literal(_) => ValueRange::Finite(vec![ty.clone()]),
            Type::Union(left, right) => {
                match (self.value_range(left), self.value_range(right)) {
                    (ValueRange::Finite(mut a), ValueRange::Finite(b)) => {
                        for t in b {
                            if !a.contains(&t) {
                                a.push(t);
                            }
                        }
                        ValueRange::Finite(a)
                    }
                    (ValueRange::Structural, _) | (_, ValueRange::Structural) => {
                        ValueRange::Structural
                    }
                    _ => ValueRange::Infinite,
                }
            }
            Type::Named { name, .. } => match self.types.get(name) {
                Some(TypeDef::Builtin) => match name.as_str() {
                    "Bool" => ValueRange::Finite(vec![
                        Type::Literal(Literal::Bool(true)),
                        Type::Literal(Literal::Bool(false)),
                    ]),
                    "Unit" => ValueRange::Finite(vec![ty.clone()]),
                    _ => ValueRange::Infinite,
                },
                Some(TypeDef::Enum { members }) => {
                    ValueRange::Finite(members.iter().map(Type::named).collect())
                }
                Some(TypeDef::EnumMember { .. }) | Some(TypeDef::Object { .. }) => {
                    ValueRange::Finite(vec![ty.clone()])
                }
                Some(TypeDef::Sealed { children, .. }) => {
                    let all_objects = children
                        .iter()
                        .all(|c| matches!(self.types.get(c), Some(TypeDef::Object { .. })));
                    if all_objects {
                        ValueRange::Finite(children.iter().map(Type::named).collect())
                    } else {
                        ValueRange::Structural
                    }
                }
                Some(TypeDef::Data { .. }) => ValueRange::Structural,
                Some(TypeDef::Opaque { .. }) | Some(TypeDef::Alias { .. }) | None => {
                    ValueRange::Infinite
                }
            },
        }
    }

    fn resolve_type_expr(&self, expr: &Spanned<TypeExpr>) -> Result<Type> {
        self.resolve_in(expr, &[])
    }
}

fn lower_params(params: &[TypeParamDecl]) -> Result<Vec<TypeParam>> {
    let mut lowered: Vec<TypeParam> = Vec::with_capacity(params.len());
    for p in params {
        if lowered.iter().any(|q| q.name == p.name.node) {
            return Err(CompileError::type_error(
                format!("duplicate type parameter `{}`", p.name.node),
                p.name.span,
            ));
        }
        lowered.push(TypeParam {
            name: p.name.node.clone(),
            covariant: p.covariant,
        });
    }
    Ok(lowered)
}

fn param_names(params: &[TypeParamDecl]) -> Vec<String> {
    params.iter().map(|p| p.name.node.clone()).collect()
}

fn bind_params(params: &[TypeParam], args: &[Type]) -> HashMap<String, Type> {
    params
        .iter()
        .zip(args)
        .map(|(p, a)| (p.name.clone(), a.clone()))
        .collect()
}

fn literal_base(lit: &Literal) -> Type {
    match lit {
        Literal::Int(_) => Type::named("Int"),
        Literal::Str(_) => Type::named("String"),
        Literal::Bool(_) => Type::named("Bool"),
    }
}

/// Bind the parameters occurring in `pattern` against `actual`
fn unify(pattern: &Type, actual: &Type, subst: &mut HashMap<String, Type>) {
    match (pattern, actual) {
        (Type::Param(name), _) => {
            subst.entry(name.clone()).or_insert_with(|| actual.clone());
        }
        (
            Type::Named { name: a, args: a_args },
            Type::Named { name: b, args: b_args },
        ) if a == b => {
            for (p, t) in a_args.iter().zip(b_args) {
                unify(p, t, subst);
            }
        }
        _ => {}
    }
}
