//! Command-line front end for the filesift classification engine.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use filesift::{
    classify_parallel, ClassificationPipeline, EngineConfig, Finding, Walker,
};

/// Classify files by type using filesystem, magic-byte, and language tests.
#[derive(Debug, Parser)]
#[command(name = "filesift", version, about)]
struct Cli {
    /// Files or directories to classify (defaults to the current directory)
    paths: Vec<PathBuf>,

    /// Show the producing tier per result and a summary; enables debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Only print path and label
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Emit one JSON object per finding
    #[arg(long)]
    json: bool,

    /// Cap on bytes read from the start of each file
    #[arg(long, value_name = "BYTES")]
    max_bytes: Option<usize>,

    /// Maximum directory depth to descend
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<usize>,

    /// Also report directory entries themselves
    #[arg(long)]
    include_dirs: bool,

    /// Classify files on a worker pool (output order is unchanged)
    #[arg(long)]
    parallel: bool,
}

fn print_finding(finding: &Finding, cli: &Cli) {
    if cli.json {
        let record = match &finding.outcome {
            Ok(ft) => serde_json::json!({
                "path": finding.path,
                "label": ft.label,
                "category": ft.category,
            }),
            Err(e) => serde_json::json!({
                "path": finding.path,
                "error": e.to_string(),
            }),
        };
        println!("{record}");
        return;
    }

    match &finding.outcome {
        Ok(ft) if cli.verbose => {
            let tier = ft
                .category
                .map(|t| t.to_string())
                .unwrap_or_else(|| "none".to_string());
            println!("{}: {} [{}]", finding.path.display(), ft.label, tier);
        }
        Ok(ft) => println!("{}: {}", finding.path.display(), ft.label),
        Err(e) => eprintln!("{}: error: {}", finding.path.display(), e),
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let mut config = EngineConfig::default();
    if let Some(max_bytes) = cli.max_bytes {
        config.max_read_bytes = max_bytes;
    }
    let pipeline =
        ClassificationPipeline::with_config(config).context("building classification pipeline")?;

    let roots = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let mut total = 0usize;
    let mut classified = 0usize;
    let mut errors = 0usize;
    let mut record = |finding: &Finding| {
        total += 1;
        match &finding.outcome {
            Ok(_) => classified += 1,
            Err(_) => errors += 1,
        }
        print_finding(finding, cli);
    };

    if cli.parallel {
        for finding in
            classify_parallel(&pipeline, roots, cli.max_depth, cli.include_dirs)
        {
            record(&finding);
        }
    } else {
        let walker = Walker::with_options(&pipeline, roots, cli.max_depth, cli.include_dirs);
        for finding in walker {
            record(&finding);
        }
    }

    if cli.verbose && total > 1 {
        eprintln!(
            "{classified}/{total} classified{}",
            if errors > 0 {
                format!(", {errors} errors")
            } else {
                String::new()
            }
        );
    }

    Ok(errors == 0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    filesift::logging::init_tracing(default_level);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("filesift: {e:#}");
            ExitCode::from(2)
        }
    }
}
