//! svg-inliner - Inline embedded SVG styles

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use svg_inliner::{Options, SelectorEngine, Statistics, convert_with, read_svg_file};

#[derive(Parser)]
#[command(name = "svg-inliner")]
#[command(version, about = "Inline embedded CSS into SVG style attributes", long_about = None)]
#[command(after_help = "EXAMPLES:
    svg-inliner icon.svg                 Print the converted SVG
    svg-inliner icon.svg -o out.svg      Write the converted SVG to a file
    svg-inliner icon.svg --stats --json  Print statistics as JSON")]
struct Cli {
    /// Input file (.svg)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Break lines between tags for reading
    #[arg(short, long)]
    pretty: bool,

    /// Report conversion statistics on stderr
    #[arg(short, long)]
    stats: bool,

    /// Report statistics and extracted rules as JSON on stdout
    #[arg(long, requires = "output")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let input = read_svg_file(&cli.input).map_err(|e| e.to_string())?;
    let options = Options::default().with_pretty(cli.pretty);
    let conversion = convert_with(&input, &SelectorEngine, &options).map_err(|e| e.to_string())?;
    let statistics = Statistics::compute(&conversion.stats, input.len(), conversion.markup.len());

    match &cli.output {
        Some(path) => std::fs::write(path, &conversion.markup)
            .map_err(|e| format!("failed to write {path}: {e}"))?,
        None => println!("{}", conversion.markup),
    }

    if cli.json {
        let report = serde_json::json!({
            "statistics": statistics,
            "rules": conversion.stats.rules,
        });
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
    } else if cli.stats {
        eprintln!("Converted styles: {}", statistics.converted_styles);
        eprintln!("Processed elements: {}", statistics.processed_elements);
        eprintln!(
            "Size: {} -> {} bytes ({:+})",
            statistics.input_size, statistics.output_size, statistics.size_change
        );
    }

    Ok(())
}
