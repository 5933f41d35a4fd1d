//! 生成オプションと出力ファイルの扱い
//!
//! 出力先の決定、既存ファイルの上書き確認、パッケージ名の導出を行う。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{MonogenError, MonogenResult, OutputError};

/// 生成ファイルの先頭行
///
/// 既存ファイルがこの行で始まっていなければ上書きしない。
pub const GENERATED_HEADER: &str = "// Code generated by monogen. DO NOT EDIT.";

/// 1回の生成に必要な設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// テンプレートファイル
    pub template: PathBuf,
    /// 具体型の指定（`a,b;c,d`）
    pub types: String,
    /// 出力パッケージ名
    pub package: Option<String>,
    /// 出力ファイル
    pub output: Option<PathBuf>,
    /// ファイルではなく標準出力に書く
    pub to_stdout: bool,
    /// 解析したテンプレートを JSON で出力
    pub dump_ast: bool,
    /// 宣言ごとの依存集合を出力
    pub dump_deps: bool,
}

impl GenerateOptions {
    pub fn new(template: impl Into<PathBuf>, types: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            types: types.into(),
            ..Self::default()
        }
    }

    /// 書き込み先のパス
    pub fn output_path(&self) -> PathBuf {
        output_path(self.output.as_deref(), &self.template)
    }
}

/// 出力ファイル名を決める
///
/// 明示された出力先を優先する。なければテンプレートのファイル名を使い、
/// テンプレートのパスにディレクトリ部分がないときは `gen-` を付ける。
pub fn output_path(out: Option<&Path>, template: &Path) -> PathBuf {
    if let Some(out) = out {
        return out.to_path_buf();
    }

    match template.file_name() {
        Some(name) if Path::new(name) == template => {
            let mut prefixed = std::ffi::OsString::from("gen-");
            prefixed.push(name);
            PathBuf::from(prefixed)
        }
        Some(name) => PathBuf::from(name),
        None => template.to_path_buf(),
    }
}

/// 既存ファイルを上書きしてよいか確認する
///
/// ファイルがなければ常に書き込める。
pub fn check_overwrite(path: &Path) -> MonogenResult<()> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(MonogenError::Io(format!(
                "can not read file {}: {}",
                path.display(),
                e
            )))
        }
    };

    if contents.starts_with(GENERATED_HEADER.as_bytes()) {
        Ok(())
    } else {
        Err(OutputError::ForeignFile {
            path: path.to_path_buf(),
        }
        .into())
    }
}

/// 出力するパッケージ名を決める
///
/// 明示された名前を優先し、なければ出力ファイルのあるディレクトリ名を使う。
pub fn package_name(package: Option<&str>, out: &Path) -> MonogenResult<String> {
    if let Some(package) = package {
        return Ok(package.to_string());
    }

    let absolute = if out.is_absolute() {
        out.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| MonogenError::Io(e.to_string()))?
            .join(out)
    };

    absolute
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            OutputError::InvalidPath {
                path: out.to_path_buf(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(None, "list.go", "gen-list.go"; "bare template name")]
    #[test_case(None, "./list/list.go", "list.go"; "template in directory")]
    #[test_case(Some("z.go"), "./list/list.go", "z.go"; "explicit output")]
    fn test_output_path(out: Option<&str>, template: &str, expected: &str) {
        let path = output_path(out.map(Path::new), Path::new(template));
        assert_eq!(path, PathBuf::from(expected));
    }

    #[test]
    fn test_overwrite_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(check_overwrite(&dir.path().join("out.go")).is_ok());
    }

    #[test]
    fn test_overwrite_generated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.go");
        fs::write(&path, format!("{}\n\npackage main\n", GENERATED_HEADER)).unwrap();
        assert!(check_overwrite(&path).is_ok());
    }

    #[test]
    fn test_overwrite_foreign_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.go");
        fs::write(&path, "package main\n").unwrap();

        let err = check_overwrite(&path).unwrap_err();
        assert!(matches!(
            err,
            MonogenError::Output(OutputError::ForeignFile { .. })
        ));
    }

    #[test]
    fn test_package_name_from_directory() {
        let dir = TempDir::new().unwrap();
        let pkg_dir = dir.path().join("lists");
        let name = package_name(None, &pkg_dir.join("out.go")).unwrap();
        assert_eq!(name, "lists");
    }

    #[test]
    fn test_explicit_package_name() {
        let name = package_name(Some("main"), Path::new("/tmp/x/out.go")).unwrap();
        assert_eq!(name, "main");
    }
}
