//! Token definitions for Go source

use logos::Logos;
use std::fmt;

/// Go tokens
///
/// Literal tokens keep their text exactly as written so the printer can
/// reproduce them verbatim.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f\r]+")] // Skip whitespace (except newlines)
pub enum Token {
    // Keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    // Identifiers (must come after keywords to avoid conflicts)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // Literals
    #[regex(r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|[0-9][0-9_]*", |lex| lex.slice().to_owned())]
    Integer(String),

    #[regex(
        r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?|[0-9][0-9_]*[eE][+-]?[0-9_]+|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?",
        |lex| lex.slice().to_owned()
    )]
    Float(String),

    #[regex(r"'([^'\\\n]|\\[^\n])+'", |lex| lex.slice().to_owned())]
    Rune(String),

    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_owned())]
    String(String),

    #[regex(r"`[^`]*`", |lex| lex.slice().to_owned())]
    RawString(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AndNot,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpersandAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("&^=")]
    AndNotAssign,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Increment,
    #[token("--")]
    Decrement,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("=")]
    Assign,
    #[token(":=")]
    Define,
    #[token("!")]
    Bang,
    #[token("...")]
    Ellipsis,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Special
    #[regex(r"\n")]
    Newline,

    // Comments are moved into a side table by the lexer
    #[regex(r"//[^\n]*", |lex| lex.slice().to_owned(), allow_greedy = true)]
    LineComment(String),
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().to_owned())]
    BlockComment(String),
}

impl Token {
    /// Whether a newline directly after this token terminates the statement
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Integer(_)
                | Token::Float(_)
                | Token::Rune(_)
                | Token::String(_)
                | Token::RawString(_)
                | Token::Break
                | Token::Continue
                | Token::Fallthrough
                | Token::Return
                | Token::Increment
                | Token::Decrement
                | Token::RightParen
                | Token::RightBracket
                | Token::RightBrace
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "Identifier({})", s),
            Token::Integer(s) => write!(f, "Integer({})", s),
            Token::Float(s) => write!(f, "Float({})", s),
            Token::Rune(s) => write!(f, "Rune({})", s),
            Token::String(s) => write!(f, "String({})", s),
            Token::RawString(s) => write!(f, "RawString({})", s),
            Token::Newline => write!(f, "newline"),
            _ => write!(f, "{:?}", self),
        }
    }
}
