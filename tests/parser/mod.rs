//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use monogen::ast::*;
use monogen::codegen::print_file;
use monogen::lexer::tokenize;
use monogen::parser::{ParseError, Parser};

/// ソースコードを解析してASTを取得するヘルパー関数
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let lexed = tokenize(source).expect("Lexing should succeed");
    let mut parser = Parser::new(lexed);
    parser.parse()
}

/// 解析に成功することを確認するヘルパー関数
pub fn assert_parse_success(source: &str) -> SourceFile {
    parse_source(source).expect("Parsing should succeed")
}

/// 解析に失敗することを確認するヘルパー関数
pub fn assert_parse_error(source: &str) -> ParseError {
    parse_source(source).expect_err("Parsing should fail")
}

/// 解析して出力し直した結果が元のソースと一致することを確認する
pub fn assert_roundtrip(source: &str) {
    let file = assert_parse_success(source);
    pretty_assertions::assert_eq!(print_file(&file), source);
}

/// 関数本体の文を1つ取り出す
pub fn first_statement(file: &SourceFile) -> &Stmt {
    match &file.decls[0] {
        Decl::Func(FuncDecl {
            body: Some(body), ..
        }) => &body.statements[0],
        other => panic!("expected a function with a body, got {:?}", other),
    }
}

// サブモジュールの宣言
#[cfg(test)]
mod decl_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod expr_test;
#[cfg(test)]
mod stmt_test;
#[cfg(test)]
mod tag_test;
