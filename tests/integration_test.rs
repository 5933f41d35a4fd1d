//! 統合テスト
//!
//! テンプレートファイルを読み込み、生成ファイルを書き出すまでの流れを確認する。

use std::fs;
use std::path::Path;

use monogen::compiler::generate;
use monogen::config::{GenerateOptions, GENERATED_HEADER};
use monogen::error::{MonogenError, OutputError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LIST_TEMPLATE: &str = "package temp

//generic
type ITEM int

// List stores the elements
type List struct {
	items []ITEM
}

// Add adds an element to the list
func (l *List) Add(item ITEM) {
	l.items = append(l.items, item)
}
";

fn write_template(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_generate_into_file() {
    let dir = TempDir::new().unwrap();
    let pkg_dir = dir.path().join("lists");
    fs::create_dir(&pkg_dir).unwrap();
    let template = write_template(dir.path(), "list.go", LIST_TEMPLATE);
    let output = pkg_dir.join("list_gen.go");

    let mut options = GenerateOptions::new(&template, "int;string");
    options.output = Some(output.clone());
    generate(options).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    let expected = format!(
        "{}\n// template: {}\n\npackage lists

type ListInt struct {{
	items []int
}}

func (l *ListInt) Add(item int) {{
	l.items = append(l.items, item)
}}

type ListString struct {{
	items []string
}}

func (l *ListString) Add(item string) {{
	l.items = append(l.items, item)
}}

",
        GENERATED_HEADER,
        template.display()
    );
    assert_eq!(generated, expected);
}

#[test]
fn test_regenerate_overwrites_generated_file() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path(), "list.go", LIST_TEMPLATE);
    let output = dir.path().join("out.go");

    let mut options = GenerateOptions::new(&template, "int");
    options.output = Some(output.clone());
    options.package = Some("main".to_string());
    generate(options.clone()).unwrap();

    options.types = "float64".to_string();
    generate(options).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("package main\n"));
    assert!(generated.contains("type ListFloat64 struct"));
    assert!(!generated.contains("type ListInt struct"));
}

#[test]
fn test_foreign_file_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path(), "list.go", LIST_TEMPLATE);
    let output = write_template(dir.path(), "handwritten.go", "package main\n\nfunc main() {}\n");

    let mut options = GenerateOptions::new(&template, "int");
    options.output = Some(output.clone());
    let err = generate(options).unwrap_err();

    assert!(matches!(
        err,
        MonogenError::Output(OutputError::ForeignFile { .. })
    ));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "package main\n\nfunc main() {}\n"
    );
}

#[test]
fn test_errors_leave_no_output_file() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path(), "list.go", LIST_TEMPLATE);
    let output = dir.path().join("out.go");

    let mut options = GenerateOptions::new(&template, "int,string");
    options.output = Some(output.clone());
    let err = generate(options).unwrap_err();

    assert!(matches!(err, MonogenError::Specialize(_)));
    assert!(!output.exists());
}

#[test]
fn test_syntax_error_in_template() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path(), "broken.go", "package p\n\nfunc f( {\n");

    let mut options = GenerateOptions::new(&template, "int");
    options.to_stdout = true;
    let err = generate(options).unwrap_err();

    assert!(matches!(err, MonogenError::Parser(_)));
}

#[test]
fn test_missing_template() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions::new(dir.path().join("missing.go"), "int");
    let err = generate(options).unwrap_err();
    assert!(matches!(err, MonogenError::Io(_)));
}
