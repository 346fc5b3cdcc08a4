use anyhow::Result;
use clap::{Parser, Subcommand};
use siteswap_notation::{analyse, parse, preprocess, AnalyseOptions};

#[derive(Parser)]
#[command(name = "siteswap")]
#[command(about = "Siteswap pattern analyser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a pattern and report its invariants
    Analyse {
        /// Pattern to analyse
        pattern: String,

        /// Permit negative throws and quantities
        #[arg(short, long)]
        theoretical: bool,

        /// Maximum per-hand state range
        #[arg(short, long, default_value = "100")]
        maximum_length: usize,

        /// Output format (json or debug)
        #[arg(long, default_value = "debug")]
        output_format: String,
    },
    /// Print the canonical minimal-period form of a pattern
    Fmt {
        /// Pattern to normalise
        pattern: String,

        /// Permit negative throws and quantities
        #[arg(short, long)]
        theoretical: bool,
    },
    /// Parse a pattern and dump the semantic model
    Ast {
        /// Pattern to parse
        pattern: String,

        /// Output format (json or debug)
        #[arg(long, default_value = "debug")]
        output_format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyse {
            pattern,
            theoretical,
            maximum_length,
            output_format,
        } => {
            let options = AnalyseOptions {
                allow_theoretical_patterns: theoretical,
                maximum_length,
            };
            match analyse(&pattern, &options) {
                Ok(analysis) => {
                    match output_format.as_str() {
                        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
                        _ => println!("{:#?}", analysis),
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Fmt {
            pattern,
            theoretical,
        } => {
            let options = AnalyseOptions {
                allow_theoretical_patterns: theoretical,
                ..AnalyseOptions::default()
            };
            match analyse(&pattern, &options) {
                Ok(analysis) => match analysis.normalised {
                    Some(normalised) => {
                        println!("{}", normalised);
                        Ok(())
                    }
                    None => {
                        eprintln!("✗ '{}' is not a valid pattern", analysis.pattern);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Ast {
            pattern,
            output_format,
        } => {
            let text = preprocess(&pattern);
            match parse(&text) {
                Ok(model) => {
                    match output_format.as_str() {
                        "json" => println!("{}", serde_json::to_string_pretty(&model)?),
                        _ => println!("{:#?}", model),
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("✗ parse error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
