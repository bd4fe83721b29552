//! Abstract Syntax Tree definitions

mod pattern;
mod span;
mod types;

pub use pattern::*;
pub use span::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// A program is a sequence of declarations and checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Item>,
}

/// Top-level item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Type(TypeDecl),
    Alias(AliasDecl),
    Enum(EnumDecl),
    Sealed(SealedDecl),
    Data(DataDecl),
    Object(ObjectDecl),
    Const(ConstDecl),
    Extractor(ExtractorDecl),
    Check(Check),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::Type(d) => d.span,
            Item::Alias(d) => d.span,
            Item::Enum(d) => d.span,
            Item::Sealed(d) => d.span,
            Item::Data(d) => d.span,
            Item::Object(d) => d.span,
            Item::Const(d) => d.span,
            Item::Extractor(d) => d.span,
            Item::Check(c) => c.span,
        }
    }
}

/// Opaque nominal type: `type Name[T];`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: Spanned<String>,
    pub params: Vec<TypeParamDecl>,
    pub span: Span,
}

/// Type alias: `alias Name[T] = A | B;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: Spanned<String>,
    pub params: Vec<TypeParamDecl>,
    pub target: Spanned<TypeExpr>,
    pub span: Span,
}

/// Enumeration of stable values: `enum Color { Red, Green }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: Spanned<String>,
    pub members: Vec<Spanned<String>>,
    pub span: Span,
}

/// Sealed abstract parent: `sealed Option[+T];`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedDecl {
    pub name: Spanned<String>,
    pub params: Vec<TypeParamDecl>,
    pub span: Span,
}

/// Product type with a constructor pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataDecl {
    pub name: Spanned<String>,
    pub params: Vec<TypeParamDecl>,
    pub fields: Vec<FieldDecl>,
    pub parent: Option<Spanned<TypeExpr>>,
    pub span: Span,
}

/// Constructor field; `repeated` marks a trailing `T*`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: Spanned<String>,
    pub ty: Spanned<TypeExpr>,
    pub repeated: bool,
}

/// Singleton value: `object None extends Option[Nothing];`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDecl {
    pub name: Spanned<String>,
    pub parent: Option<Spanned<TypeExpr>>,
    pub span: Span,
}

/// Named constant: `const Max = 3;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: Spanned<String>,
    pub value: Spanned<Literal>,
    pub span: Span,
}

/// Extractor: `extractor Even[T]: Box[T];`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorDecl {
    pub name: Spanned<String>,
    pub params: Vec<TypeParamDecl>,
    pub scrutinee: Spanned<TypeExpr>,
    pub span: Span,
}

/// A check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub kind: CheckKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CheckKind {
    /// `check T in U;`
    PartOf {
        candidate: Spanned<TypeExpr>,
        union: Spanned<TypeExpr>,
    },
    /// `check some A in B;`
    ContainsSomeOf {
        smaller: Spanned<TypeExpr>,
        bigger: Spanned<TypeExpr>,
    },
    /// `check all A == B;`
    ContainsAllOf {
        left: Spanned<TypeExpr>,
        right: Spanned<TypeExpr>,
    },
    /// `match U total exhaustive within S with { .. }`
    Match {
        union: Spanned<TypeExpr>,
        total: bool,
        exhaustive: Option<Exhaustive>,
        handler: Spanned<Handler>,
    },
}

/// Exhaustiveness request, optionally scoped to a sub-union
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exhaustive {
    pub scope: Option<Spanned<TypeExpr>>,
}
