//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::ast::Span;
use crate::error::{CompileError, Result};
use logos::Logos;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(_) => {
                return Err(CompileError::lexer(
                    format!("unexpected character: {:?}", lexer.slice()),
                    span,
                ));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_keywords() {
        assert_eq!(
            kinds("check some all in match total exhaustive within with case"),
            vec![
                Token::Check,
                Token::Some,
                Token::All,
                Token::In,
                Token::Match,
                Token::Total,
                Token::Exhaustive,
                Token::Within,
                Token::With,
                Token::Case,
            ]
        );
    }

    #[test]
    fn test_tokenize_declaration_keywords() {
        assert_eq!(
            kinds("type alias enum sealed data object const extractor extends"),
            vec![
                Token::Type,
                Token::Alias,
                Token::Enum,
                Token::Sealed,
                Token::Data,
                Token::Object,
                Token::Const,
                Token::Extractor,
                Token::Extends,
            ]
        );
    }

    #[test]
    fn test_tokenize_literals() {
        assert_eq!(
            kinds(r#"42 "hi" true false"#),
            vec![
                Token::IntLit(42),
                Token::StringLit("hi".to_string()),
                Token::True,
                Token::False,
            ]
        );
    }

    #[test]
    fn test_tokenize_pattern_symbols() {
        assert_eq!(
            kinds("x @ _* | y: Int => ()"),
            vec![
                Token::Ident("x".to_string()),
                Token::At,
                Token::Underscore,
                Token::Star,
                Token::Pipe,
                Token::Ident("y".to_string()),
                Token::Colon,
                Token::Ident("Int".to_string()),
                Token::FatArrow,
                Token::LParen,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_equality_vs_assign() {
        assert_eq!(kinds("== = =>"), vec![Token::EqEq, Token::Eq, Token::FatArrow]);
    }

    #[test]
    fn test_tokenize_underscore_prefixed_ident() {
        assert_eq!(kinds("_rest"), vec![Token::Ident("_rest".to_string())]);
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("data Box").unwrap();
        assert_eq!(tokens[0].1, Span::new(0, 4));
        assert_eq!(tokens[1].1, Span::new(5, 8));
    }

    #[test]
    fn test_tokenize_skips_comments() {
        assert_eq!(
            kinds("check // a comment\nInt -- another\n;"),
            vec![Token::Check, Token::Ident("Int".to_string()), Token::Semi]
        );
    }

    #[test]
    fn test_tokenize_negative_is_minus_then_int() {
        assert_eq!(kinds("-1"), vec![Token::Minus, Token::IntLit(1)]);
    }

    #[test]
    fn test_tokenize_unexpected_character() {
        let err = tokenize("check Int ? ;").unwrap_err();
        assert_eq!(err.span(), Some(Span::new(10, 11)));
        assert!(err.message().contains("unexpected character"));
    }
}
