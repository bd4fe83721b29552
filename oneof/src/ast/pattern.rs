//! Pattern and case-clause AST nodes

use super::{Literal, Span, Spanned, TypeExpr};
use serde::{Deserialize, Serialize};

/// Pattern in a case clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Wildcard: `_`
    Wildcard,
    /// Variable bind without ascription: `x`
    Var(String),
    /// Stable identifier or selector reference: `None`, `Color.Red`
    Ref(String),
    /// Literal constant: `1`, `"a"`, `true`
    Literal(Literal),
    /// Named sub-pattern: `name @ p`
    Bind {
        name: Spanned<String>,
        pattern: Box<Spanned<Pattern>>,
    },
    /// Type ascription: `p: T`
    Typed {
        pattern: Box<Spanned<Pattern>>,
        ty: Spanned<TypeExpr>,
    },
    /// Constructor or extractor application: `Some(p)`
    Apply {
        head: Spanned<String>,
        args: Vec<Spanned<Pattern>>,
    },
    /// Repeated pattern: `p*`
    Star(Box<Spanned<Pattern>>),
    /// Alternation: `p | q`
    Alt(Vec<Spanned<Pattern>>),
}

impl Pattern {
    /// Classify an identifier the way the pattern grammar does: lowercase
    /// single identifiers bind, anything else refers to a stable value.
    pub fn from_path(path: String) -> Pattern {
        let binds = !path.contains('.')
            && path
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        if binds {
            Pattern::Var(path)
        } else {
            Pattern::Ref(path)
        }
    }

    /// True for patterns that match anything without inspecting the value
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Pattern::Wildcard | Pattern::Var(_) => true,
            Pattern::Bind { pattern, .. } => pattern.node.is_irrefutable(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Var(name) | Pattern::Ref(name) => write!(f, "{name}"),
            Pattern::Literal(lit) => write!(f, "{lit}"),
            Pattern::Bind { name, pattern } => write!(f, "{} @ {}", name.node, pattern.node),
            Pattern::Typed { pattern, ty } => write!(f, "{}: {}", pattern.node, ty.node),
            Pattern::Apply { head, args } => {
                write!(f, "{}(", head.node)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg.node)?;
                }
                write!(f, ")")
            }
            Pattern::Star(inner) => write!(f, "{}*", inner.node),
            Pattern::Alt(alts) => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alt.node)?;
                }
                Ok(())
            }
        }
    }
}

/// Right-hand side of a case clause. The checker never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaseBody {
    Literal(Literal),
    Path(String),
    Unit,
}

/// `case <pattern> => <body>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    pub pattern: Spanned<Pattern>,
    pub body: Spanned<CaseBody>,
    pub span: Span,
}

/// The value handed to a `match` check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Handler {
    /// Partial-function literal: `{ case .. => .. }`
    Cases(Vec<CaseClause>),
    /// Reference to some other value
    Path(String),
    /// Literal value
    Literal(Literal),
}
