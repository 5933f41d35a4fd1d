//! 生成パイプラインのメイン処理モジュール
//!
//! テンプレートの読み込みから字句解析、構文解析、名前解決、単相化、
//! 出力までの流れを管理する。

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::{debug, info};

use crate::analyzer::{resolve_file, Instances, Monomorphizer};
use crate::ast::SourceFile;
use crate::config::{check_overwrite, package_name, GenerateOptions, GENERATED_HEADER};
use crate::error::{DiagnosticError, MonogenError, MonogenResult};
use crate::lexer::tokenize;
use crate::parser::Parser;

/// ソースをテンプレートとして読み込む
///
/// 字句解析、構文解析、名前解決までを行う。
pub fn parse_template(source: &str) -> MonogenResult<SourceFile> {
    let lexed = tokenize(source)?;
    debug!(
        "{} tokens, {} comments",
        lexed.tokens.len(),
        lexed.comments.len()
    );

    let mut parser = Parser::new(lexed);
    let mut file = parser.parse()?;
    resolve_file(&mut file);
    Ok(file)
}

/// 生成中の状態
pub struct CompilationState {
    pub template_file: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
}

impl CompilationState {
    /// テンプレートファイルを読み込む
    pub fn new<P: AsRef<Path>>(template_file: P) -> MonogenResult<Self> {
        let source = fs::read_to_string(template_file.as_ref()).map_err(|e| {
            MonogenError::Io(format!(
                "failed to read template {}: {}",
                template_file.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::new_from_string(
            &template_file.as_ref().display().to_string(),
            source,
        ))
    }

    /// 文字列から作成（テスト用）
    pub fn new_from_string(filename: &str, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(filename.to_string(), source.clone());

        Self {
            template_file: filename.to_string(),
            source,
            files,
            file_id,
        }
    }

    /// エラーを診断情報として標準エラー出力に表示する
    ///
    /// ソース位置を持たないエラーはラベルなしで表示される。
    pub fn report_error(&self, error: &MonogenError) -> MonogenResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        let diagnostic = DiagnosticError::new(error.clone(), self.file_id).to_diagnostic();

        let mut lock = writer.lock();
        codespan_reporting::term::emit(&mut lock, &config, &self.files, &diagnostic)
            .map_err(|e| MonogenError::Io(format!("failed to emit diagnostic: {}", e)))
    }
}

/// 生成パイプライン
pub struct CompilationPipeline {
    state: CompilationState,
    options: GenerateOptions,
}

impl CompilationPipeline {
    pub fn new(state: CompilationState, options: GenerateOptions) -> Self {
        Self { state, options }
    }

    pub fn state(&self) -> &CompilationState {
        &self.state
    }

    /// テンプレートを解析する
    pub fn parse(&self) -> MonogenResult<SourceFile> {
        info!("parsing template {}", self.state.template_file);
        parse_template(&self.state.source)
    }

    /// 解析結果から単相化エンジンを準備する
    pub fn prepare(&self, file: SourceFile) -> MonogenResult<Monomorphizer> {
        let instances = Instances::parse(&self.options.types)?;
        debug!("{} instances of arity {}", instances.len(), instances.arity());
        Monomorphizer::new(file, instances)
    }

    /// 生成したコードを文字列で返す（ヘッダー行は含まない）
    pub fn render(&self, package: Option<&str>) -> MonogenResult<String> {
        let file = self.parse()?;
        let monomorphizer = self.prepare(file)?;

        let mut out = Vec::new();
        monomorphizer.specialize(package, &mut out)?;
        String::from_utf8(out).map_err(|e| MonogenError::Io(e.to_string()))
    }

    /// パイプライン全体を実行
    pub fn run(&self) -> MonogenResult<()> {
        let file = self.parse()?;

        if self.options.dump_ast {
            let json = serde_json::to_string_pretty(&file)
                .map_err(|e| MonogenError::Io(e.to_string()))?;
            println!("{}", json);
        }

        let monomorphizer = self.prepare(file)?;

        if self.options.dump_deps {
            print!("{}", monomorphizer.dependency_report());
        }

        if self.options.to_stdout {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            self.write_preamble(&mut out)?;
            monomorphizer.specialize(self.options.package.as_deref(), &mut out)?;
            return Ok(());
        }

        let path = self.options.output_path();
        check_overwrite(&path)?;
        let package = package_name(self.options.package.as_deref(), &path)?;

        let mut buffer = Vec::new();
        self.write_preamble(&mut buffer)?;
        monomorphizer.specialize(Some(&package), &mut buffer)?;

        fs::write(&path, buffer).map_err(|e| {
            MonogenError::Io(format!("failed to write {}: {}", path.display(), e))
        })?;
        info!("wrote {}", path.display());

        Ok(())
    }

    /// 生成ファイルの先頭2行
    fn write_preamble<W: Write>(&self, out: &mut W) -> MonogenResult<()> {
        writeln!(out, "{}", GENERATED_HEADER)?;
        writeln!(out, "// template: {}", self.state.template_file)?;
        writeln!(out)?;
        Ok(())
    }
}

/// オプションに従ってテンプレートを読み込み、特殊化したコードを書き出す
pub fn generate(options: GenerateOptions) -> MonogenResult<()> {
    let state = CompilationState::new(&options.template)?;
    let pipeline = CompilationPipeline::new(state, options);

    match pipeline.run() {
        Ok(()) => Ok(()),
        Err(error @ (MonogenError::Lexer(_) | MonogenError::Parser(_))) => {
            pipeline.state().report_error(&error)?;
            Err(error)
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "package list\n\n//generic\ntype T int\n\ntype List []T\n";

    #[test]
    fn test_parse_template_resolves_placeholders() {
        let file = parse_template(TEMPLATE).unwrap();
        assert_eq!(file.package_name(), "list");
        assert_eq!(file.decls.len(), 2);
        assert_eq!(file.objects.len(), 2);
    }

    #[test]
    fn test_render_from_string() {
        let state = CompilationState::new_from_string("list.go", TEMPLATE.to_string());
        let pipeline = CompilationPipeline::new(state, GenerateOptions::new("list.go", "int32"));

        let rendered = pipeline.render(Some("main")).unwrap();
        assert_eq!(rendered, "package main\n\ntype ListInt32 []int32\n\n");
    }

    #[test]
    fn test_report_syntax_error() {
        let state = CompilationState::new_from_string("broken.go", "package p\n\nfunc f( {\n".to_string());
        let error = parse_template(&state.source).unwrap_err();
        assert!(matches!(error, MonogenError::Parser(_)));
        assert!(state.report_error(&error).is_ok());
    }
}
