//! 字句解析テスト
//!
//! セミコロンの自動挿入、コメントの分離、リテラルの保持を確認する。

use monogen::error::LexerError;
use monogen::lexer::{tokenize, Token};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source)
        .expect("lexing should succeed")
        .tokens
        .into_iter()
        .map(|t| t.token)
        .collect()
}

#[test]
fn test_package_clause() {
    assert_eq!(
        kinds("package list\n"),
        vec![
            Token::Package,
            Token::Identifier("list".into()),
            Token::Semicolon,
        ]
    );
}

#[test_case("return\n", true; "after return")]
#[test_case("x++\n", true; "after increment")]
#[test_case("f()\n", true; "after closing paren")]
#[test_case("}\n", true; "after closing brace")]
#[test_case("x,\n", false; "after comma")]
#[test_case("{\n", false; "after opening brace")]
#[test_case("a &&\n", false; "after operator")]
fn test_semicolon_insertion(source: &str, inserted: bool) {
    let tokens = kinds(source);
    assert_eq!(tokens.last() == Some(&Token::Semicolon), inserted);
}

#[test]
fn test_comments_are_not_tokens() {
    let output = tokenize("// header\n//generic\ntype T int // trailing\n").unwrap();
    assert_eq!(output.comments.len(), 3);
    assert_eq!(
        output.tokens.iter().map(|t| t.token.clone()).collect::<Vec<_>>(),
        vec![
            Token::Type,
            Token::Identifier("T".into()),
            Token::Identifier("int".into()),
            Token::Semicolon,
        ]
    );
    assert_eq!(output.comments[2].line, 3);
}

#[test]
fn test_multiline_block_comment_ends_statement() {
    let tokens = kinds("x /* a\nb */ y");
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("x".into()),
            Token::Semicolon,
            Token::Identifier("y".into()),
            Token::Semicolon,
        ]
    );
}

#[test]
fn test_literals_keep_their_text() {
    let tokens = kinds(r#"0x1F 1.5e3 'a' "s\n" `raw`"#);
    assert_eq!(
        tokens,
        vec![
            Token::Integer("0x1F".into()),
            Token::Float("1.5e3".into()),
            Token::Rune("'a'".into()),
            Token::String(r#""s\n""#.into()),
            Token::RawString("`raw`".into()),
            Token::Semicolon,
        ]
    );
}

#[test]
fn test_operators_prefer_longest_match() {
    assert_eq!(
        kinds("a &^= b <- c := d"),
        vec![
            Token::Identifier("a".into()),
            Token::AndNotAssign,
            Token::Identifier("b".into()),
            Token::Arrow,
            Token::Identifier("c".into()),
            Token::Define,
            Token::Identifier("d".into()),
            Token::Semicolon,
        ]
    );
}

#[test]
fn test_positions_are_one_based() {
    let output = tokenize("package p\n\ntype  T int\n").unwrap();
    let t = output
        .tokens
        .iter()
        .find(|t| t.token == Token::Identifier("T".into()))
        .unwrap();
    assert_eq!((t.position.line, t.position.column), (3, 7));
}

#[test]
fn test_unrecognized_character() {
    let err = tokenize("x := @y").unwrap_err();
    match err {
        LexerError::UnrecognizedToken { token, span } => {
            assert_eq!(token, "@");
            assert_eq!((span.start, span.end), (5, 6));
        }
    }
}
