//! Type expression AST nodes

use super::Spanned;
use serde::{Deserialize, Serialize};

/// Literal constant, usable both as a pattern and as a singleton type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Type expression as written in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Named type, possibly applied: `Int`, `Option[T]`, `Color.Red`
    Path {
        name: String,
        args: Vec<Spanned<TypeExpr>>,
    },
    /// Literal singleton type: `1`, `"a"`, `true`
    Literal(Literal),
    /// Binary union: `A | B`
    Union(Box<Spanned<TypeExpr>>, Box<Spanned<TypeExpr>>),
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Path { name, args } if args.is_empty() => write!(f, "{name}"),
            TypeExpr::Path { name, args } => {
                write!(f, "{name}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg.node)?;
                }
                write!(f, "]")
            }
            TypeExpr::Literal(lit) => write!(f, "{lit}"),
            TypeExpr::Union(left, right) => write!(f, "{} | {}", left.node, right.node),
        }
    }
}

/// Declared type parameter: `T` or covariant `+T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParamDecl {
    pub name: Spanned<String>,
    pub covariant: bool,
}
