//! Token definitions

use logos::Logos;

/// oneof token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"--[^\n]*")]
pub enum Token {
    // Declarations
    #[token("type")]
    Type,
    #[token("alias")]
    Alias,
    #[token("enum")]
    Enum,
    #[token("sealed")]
    Sealed,
    #[token("data")]
    Data,
    #[token("object")]
    Object,
    #[token("const")]
    Const,
    #[token("extractor")]
    Extractor,
    #[token("extends")]
    Extends,

    // Checks
    #[token("check")]
    Check,
    #[token("some")]
    Some,
    #[token("all")]
    All,
    #[token("in")]
    In,
    #[token("match")]
    Match,
    #[token("total")]
    Total,
    #[token("exhaustive")]
    Exhaustive,
    #[token("within")]
    Within,
    #[token("with")]
    With,
    #[token("case")]
    Case,

    #[token("true")]
    True,
    #[token("false")]
    False,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 2)]
    IntLit(i64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    StringLit(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    // Symbols
    #[token("=>")]
    FatArrow,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("_")]
    Underscore,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
}

/// Strip the surrounding quotes of a string literal and process escapes
fn unescape(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut result = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Type => write!(f, "type"),
            Token::Alias => write!(f, "alias"),
            Token::Enum => write!(f, "enum"),
            Token::Sealed => write!(f, "sealed"),
            Token::Data => write!(f, "data"),
            Token::Object => write!(f, "object"),
            Token::Const => write!(f, "const"),
            Token::Extractor => write!(f, "extractor"),
            Token::Extends => write!(f, "extends"),
            Token::Check => write!(f, "check"),
            Token::Some => write!(f, "some"),
            Token::All => write!(f, "all"),
            Token::In => write!(f, "in"),
            Token::Match => write!(f, "match"),
            Token::Total => write!(f, "total"),
            Token::Exhaustive => write!(f, "exhaustive"),
            Token::Within => write!(f, "within"),
            Token::With => write!(f, "with"),
            Token::Case => write!(f, "case"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::StringLit(s) => write!(f, "\"{s}\""),
            Token::Ident(s) => write!(f, "{s}"),
            Token::FatArrow => write!(f, "=>"),
            Token::EqEq => write!(f, "=="),
            Token::Eq => write!(f, "="),
            Token::Underscore => write!(f, "_"),
            Token::Colon => write!(f, ":"),
            Token::Semi => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Pipe => write!(f, "|"),
            Token::At => write!(f, "@"),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keywords() {
        assert_eq!(format!("{}", Token::Sealed), "sealed");
        assert_eq!(format!("{}", Token::Exhaustive), "exhaustive");
        assert_eq!(format!("{}", Token::Within), "within");
        assert_eq!(format!("{}", Token::Case), "case");
    }

    #[test]
    fn test_display_literals() {
        assert_eq!(format!("{}", Token::IntLit(42)), "42");
        assert_eq!(format!("{}", Token::StringLit("hi".to_string())), "\"hi\"");
        assert_eq!(format!("{}", Token::Ident("Some".to_string())), "Some");
    }

    #[test]
    fn test_display_symbols() {
        assert_eq!(format!("{}", Token::FatArrow), "=>");
        assert_eq!(format!("{}", Token::LBrace), "{");
        assert_eq!(format!("{}", Token::RBrace), "}");
        assert_eq!(format!("{}", Token::Pipe), "|");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#""a\nb""#), "a\nb");
        assert_eq!(unescape(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(unescape(r#""\q""#), "\\q");
    }
}
