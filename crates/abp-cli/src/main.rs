//! abp-cli
//!
//! CLI tool for parsing, validating and re-rendering filter lists.

mod report;

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use abp_filters::{parse_filter_list, parse_line};
use report::{failure_summary, format_error, read_list, scan_list, ParsedRecord};

#[derive(Parser)]
#[command(name = "abp-cli")]
#[command(about = "Adblock Plus filter list parser and tools")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse filter lists and print one JSON record per line
    Parse {
        /// Input filter list files
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// Stop at the first line that fails to parse
        #[arg(long)]
        strict: bool,
    },

    /// Validate filter lists and summarize their contents
    Check {
        /// Input filter list files
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,
    },

    /// Print the canonical rendering of every line
    Render {
        /// Input filter list file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse { input, strict } => cmd_parse(&input, strict),
        Commands::Check { input } => cmd_check(&input),
        Commands::Render { input } => cmd_render(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn cmd_parse(inputs: &[PathBuf], strict: bool) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0usize;
    let mut total = 0usize;

    for path in inputs {
        let content = read_list(path)?;
        let mut lines = parse_filter_list(content.lines());

        while let Some(result) = lines.next() {
            let line_number = lines.line_number();
            total += 1;
            match result {
                Ok(line) => {
                    let record = ParsedRecord { line: line_number, record: &line };
                    let json = serde_json::to_string(&record)
                        .map_err(|e| format!("Failed to serialize line {}: {}", line_number, e))?;
                    writeln!(out, "{json}").map_err(|e| format!("Failed to write output: {}", e))?;
                }
                Err(err) if strict => return Err(format_error(path, line_number, &err)),
                Err(err) => {
                    failed += 1;
                    eprintln!("{}", format_error(path, line_number, &err));
                }
            }
        }
    }

    out.flush().map_err(|e| format!("Failed to write output: {}", e))?;

    if let Some(summary) = failure_summary(failed, total) {
        eprintln!("{summary}");
    }
    Ok(())
}

fn cmd_check(inputs: &[PathBuf]) -> Result<(), String> {
    let start = Instant::now();
    let mut failed = 0usize;

    for path in inputs {
        let content = read_list(path)?;
        let report = scan_list(&content);

        println!("{}", display_name(path));
        println!("  Lines:    {}", report.lines);
        for (kind, count) in &report.kinds {
            println!("  {:<16}{}", format!("{kind}:"), count);
        }
        println!("  Errors:   {}", report.errors.len());

        for (line_number, err) in &report.errors {
            eprintln!("{}", format_error(path, *line_number, err));
        }

        if !report.is_clean() {
            failed += 1;
        }
    }

    println!("Checked {} filter lists in {:.1}ms", inputs.len(), start.elapsed().as_secs_f64() * 1000.0);

    if failed > 0 {
        return Err(format!("{} of {} filter lists have errors", failed, inputs.len()));
    }
    Ok(())
}

fn cmd_render(input: &Path) -> Result<(), String> {
    let content = read_list(input)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (index, text) in content.lines().enumerate() {
        let rendered = match parse_line(text) {
            Ok(line) => line.render(),
            Err(err) => {
                eprintln!("{}", format_error(input, index + 1, &err));
                text.trim().to_string()
            }
        };
        writeln!(out, "{rendered}").map_err(|e| format!("Failed to write output: {}", e))?;
    }

    out.flush().map_err(|e| format!("Failed to write output: {}", e))
}

fn display_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().into_owned()
}
