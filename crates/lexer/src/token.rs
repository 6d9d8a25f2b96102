use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\n\f]+")] // Ignore spaces, tabs and line breaks automatically
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
pub enum Token {
    // --- Keywords ---
    #[token("const")]
    Const,

    #[token("var")]
    Var,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // --- Literals ---

    // Identifiers: constant names and type names (ex: "MAX_SIZE", "uint8")
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Integers, kept as source text so no precision is lost (ex: 42, 0xff)
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| lex.slice().to_string())]
    Int(String),

    // Fractional and scientific literals (ex: 2.5, 1e18, 2.5e-3)
    #[regex(r"[0-9]+\.[0-9]+([eE]-?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE]-?[0-9]+", |lex| lex.slice().to_string())]
    Decimal(String),

    // Strings (ex: "hello"), quotes included
    #[regex(r#""([^"\\]|\\["\\bnfrt])*""#, |lex| lex.slice().to_string())]
    String(String),

    // --- Operators ---
    #[token(":=")]
    ColonEq,

    #[token("=")]
    Eq,

    #[token("==")]
    DoubleEq,

    #[token("!=")]
    NotEq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("**")]
    Pow,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token(">=")]
    GtEq,

    #[token("<=")]
    LtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("!")]
    Not,

    #[token("&&")]
    And,

    #[token("||")]
    Or,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    // --- Delimiters ---
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,
}

// This helps to show the token prettily in the print
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Int(text) | Token::Decimal(text) | Token::String(text) => write!(f, "{}", text),
            other => write!(f, "{:?}", other),
        }
    }
}
