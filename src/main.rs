use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use tessgen::analyzer;
use tessgen::parser::SourceFile;
use tessgen::{Generator, GeneratorConfig};

#[derive(Parser)]
#[command(
    name = "tessgen",
    version,
    about = "Generates unit-test scripts for embedded C functions."
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Generate a test script for one function
    Generate(GenerateArgs),
    /// Generate scripts for every public function under a directory
    Batch(BatchArgs),
    /// List the functions found in a C source file
    List(ListArgs),
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, help = "C source file to parse")]
    source: PathBuf,

    #[arg(long, help = "Target function name")]
    function: String,

    #[arg(long, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Output format: tessy | json | xml (overrides config)")]
    format: Option<String>,

    #[arg(long, help = "Write the script here instead of stdout")]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    #[arg(long, help = "Directory scanned recursively for .c sources")]
    dir: PathBuf,

    #[arg(long, default_value = "./test_cases", help = "Output directory")]
    out_dir: PathBuf,

    #[arg(long, help = "JSON configuration file")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, help = "C source file to parse")]
    source: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        CliCommand::Generate(args) => run_generate(args),
        CliCommand::Batch(args) => run_batch(args),
        CliCommand::List(args) => run_list(args),
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::load(args.config.as_deref())?;
    if let Some(format) = args.format {
        config.output_format = format;
    }

    let generator = Generator::new(config)?;

    match args.out {
        Some(out) => {
            generator
                .generate_to_file(&args.source, &args.function, &out)
                .with_context(|| format!("generating tests for {}", args.function))?;
        }
        None => {
            let text = generator
                .generate_from_file(&args.source, &args.function)
                .with_context(|| format!("generating tests for {}", args.function))?;
            println!("{text}");
        }
    }

    Ok(())
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig::load(args.config.as_deref())?;
    let generator = Generator::new(config)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut generated = 0usize;
    let mut failed = 0usize;

    for entry in WalkDir::new(&args.dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if entry.path().extension().and_then(|e| e.to_str()) != Some("c") {
            continue;
        }

        let source = match SourceFile::read(entry.path()) {
            Ok(source) => source,
            Err(e) => {
                error!(path = %entry.path().display(), error = %e, "skipping unreadable source");
                failed += 1;
                continue;
            }
        };

        for (name, rendered) in generator.generate_all(&source) {
            match rendered {
                Some(text) => {
                    let out = args.out_dir.join(format!("{name}_test.txt"));
                    fs::write(&out, text)
                        .with_context(|| format!("writing {}", out.display()))?;
                    generated += 1;
                }
                None => failed += 1,
            }
        }
    }

    info!(generated, failed, "batch complete");
    Ok(())
}

fn run_list(args: ListArgs) -> anyhow::Result<()> {
    let source = SourceFile::read(&args.source)?;

    for function in &source.functions {
        let analysis = analyzer::analyze(function);
        let qualifier = if function.is_static { "static " } else { "" };

        println!(
            "{}{} {}  params={} complexity={} lines={}..{}",
            qualifier,
            function.return_type,
            function.name,
            function.parameters.len(),
            analysis.complexity,
            function.line_start,
            function.line_end,
        );
    }

    Ok(())
}
