use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use monogen::config::GenerateOptions;

#[derive(Parser)]
#[command(name = "monogen")]
#[command(author, version, about = "Generates type-specialized Go source from templates", long_about = None)]
struct Cli {
    /// The template file to specialize
    #[arg(short = 't', long)]
    template: PathBuf,

    /// Concrete types, e.g. "string,int32;string,int64"
    #[arg(short = 'g', long = "types")]
    types: String,

    /// Package name of the generated file (defaults to the output directory name)
    #[arg(short = 'p', long)]
    package: Option<String>,

    /// Output file (defaults to the template name)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Write the generated code to stdout instead of a file
    #[arg(long = "stdout", conflicts_with = "output")]
    to_stdout: bool,

    /// Dump the parsed template as JSON
    #[arg(long)]
    dump_ast: bool,

    /// Dump the placeholders each declaration depends on
    #[arg(long)]
    dump_deps: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for GenerateOptions {
    fn from(cli: Cli) -> Self {
        Self {
            template: cli.template,
            types: cli.types,
            package: cli.package,
            output: cli.output,
            to_stdout: cli.to_stdout,
            dump_ast: cli.dump_ast,
            dump_deps: cli.dump_deps,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = run(cli.into()) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(options: GenerateOptions) -> Result<()> {
    let template = options.template.clone();
    monogen::generate(options)
        .with_context(|| format!("failed to generate from {}", template.display()))
}
