//! oneof: closed-union coverage checker
//!
//! Verifies pattern matches written against a closed union of declared
//! types: membership, containment, totality and per-member exhaustiveness.

pub mod analysis;
pub mod ast;
pub mod check;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod util;

pub use ast::Span;
pub use check::Checker;
pub use config::CheckConfig;
pub use error::{CompileError, Diagnostic, DiagnosticKind, Result};
