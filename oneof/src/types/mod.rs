//! Host type model
//!
//! The coverage engine never inspects declarations directly. Everything it
//! needs from the host type system goes through [`TypeOracle`], which
//! [`TypeEnv`] implements for the `.oneof` declaration language.

pub mod env;
pub mod exhaustiveness;

pub use env::TypeEnv;
pub use exhaustiveness::{ExhaustivenessOracle, StructuralOracle};

use std::collections::HashMap;

use crate::ast::{Literal, Spanned, TypeExpr};
use crate::error::Result;

/// Resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Bottom type, a subtype of everything
    Nothing,
    /// Top type
    Any,
    /// Type of wildcards and unresolved patterns; matches everything
    NoType,
    /// Nominal type, possibly applied: `Int`, `Option[Int]`, `Color.Red`
    Named { name: String, args: Vec<Type> },
    /// Literal singleton type: `1`, `"a"`, `true`
    Literal(Literal),
    /// Binary union
    Union(Box<Type>, Box<Type>),
    /// Type parameter of the enclosing declaration
    Param(String),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Type {
        Type::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn applied(name: impl Into<String>, args: Vec<Type>) -> Type {
        Type::Named {
            name: name.into(),
            args,
        }
    }

    pub fn union(left: Type, right: Type) -> Type {
        Type::Union(Box::new(left), Box::new(right))
    }

    /// Left-nested union of the given members; `Nothing` when empty
    pub fn union_of(members: impl IntoIterator<Item = Type>) -> Type {
        members
            .into_iter()
            .reduce(Type::union)
            .unwrap_or(Type::Nothing)
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(..))
    }

    /// Head name of a nominal type
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Replace type parameters according to `subst`
    pub fn substitute(&self, subst: &HashMap<String, Type>) -> Type {
        match self {
            Type::Param(name) => subst.get(name).cloned().unwrap_or_else(|| self.clone()),
            Type::Named { name, args } => Type::Named {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(subst)).collect(),
            },
            Type::Union(left, right) => {
                Type::union(left.substitute(subst), right.substitute(subst))
            }
            _ => self.clone(),
        }
    }

    /// True if any type parameter occurs in this type
    pub fn mentions_param(&self) -> bool {
        match self {
            Type::Param(_) => true,
            Type::Named { args, .. } => args.iter().any(Type::mentions_param),
            Type::Union(left, right) => left.mentions_param() || right.mentions_param(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Nothing => write!(f, "Nothing"),
            Type::Any => write!(f, "Any"),
            Type::NoType => write!(f, "<none>"),
            Type::Named { name, args } if args.is_empty() => write!(f, "{name}"),
            Type::Named { name, args } => {
                write!(f, "{name}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            Type::Literal(lit) => write!(f, "{lit}"),
            Type::Union(left, right) if right.is_union() => write!(f, "{left} | ({right})"),
            Type::Union(left, right) => write!(f, "{left} | {right}"),
            Type::Param(name) => write!(f, "{name}"),
        }
    }
}

/// Declared type parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub covariant: bool,
}

/// Declared constructor field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSig {
    pub name: String,
    pub ty: Type,
    pub repeated: bool,
}

/// Constructor of a `data` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct CtorSig {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub fields: Vec<FieldSig>,
}

impl CtorSig {
    /// The generic result type, `Name[T1, .., Tn]`
    pub fn result_type(&self) -> Type {
        Type::applied(
            self.name.clone(),
            self.type_params
                .iter()
                .map(|p| Type::Param(p.name.clone()))
                .collect(),
        )
    }
}

/// Declared extractor
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorSig {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    /// Type the extractor accepts, in terms of its type parameters
    pub scrutinee: Type,
}

/// What the head of an application pattern refers to
#[derive(Debug, Clone, PartialEq)]
pub enum PatternHead {
    Constructor(CtorSig),
    Extractor(ExtractorSig),
}

/// The values a type can take, as far as literal refinement is concerned
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRange {
    /// Enumerable: every value has a singleton type listed here
    Finite(Vec<Type>),
    /// Scalars and opaque types; no finite set of literals covers them
    Infinite,
    /// Values built by constructors; left to the exhaustiveness oracle
    Structural,
}

/// Read-only view of the host type system
pub trait TypeOracle {
    /// Expand a top-level alias application
    fn dealias(&self, ty: &Type) -> Type;

    /// `sub <: sup` under declared variance
    fn is_subtype(&self, sub: &Type, sup: &Type) -> bool;

    /// Widen literal and singleton types to the type they belong to
    fn widen(&self, ty: &Type) -> Type;

    /// Least upper bound of `types`
    fn lub(&self, types: &[Type]) -> Type;

    /// Immediate declared supertype
    fn base_type(&self, ty: &Type) -> Option<Type>;

    /// View `ty` as an application of the type constructor `name`
    fn as_instance_of(&self, ty: &Type, name: &str) -> Option<Type>;

    /// Constructor or extractor named by a pattern head
    fn pattern_head(&self, path: &str) -> Option<PatternHead>;

    /// Type of a stable identifier used in a pattern
    fn value_type(&self, path: &str) -> Option<Type>;

    fn value_range(&self, ty: &Type) -> ValueRange;

    fn resolve_type_expr(&self, expr: &Spanned<TypeExpr>) -> Result<Type>;
}
