use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use eplace_intel::rank::ScoredLead;
use eplace_intel::scoring::LeadTier;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List leads sorted by engagement score (default if no subcommand)
    List {
        /// Only show leads scoring at least this much
        #[arg(long, value_parser = clap::value_parser!(u32).range(..=100))]
        min_score: Option<u32>,

        /// Only show leads in this tier or hotter (cold, opportunity, high-potential, ready, hot)
        #[arg(long)]
        tier: Option<LeadTier>,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show the score breakdown for one lead
    Show {
        /// 1-based index as shown in list, or the entity id
        lead: String,
    },
    /// Dashboard summary: averages, readiness, tier counts, top leads
    Summary,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "eplace-intel")]
#[command(about = "Score and rank business leads by engagement", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/eplace-intel/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Entities JSON file, or - for stdin (defaults to `input` from config)
    #[arg(short, long, global = true)]
    input: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    eplace_intel::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        min_score: None,
        tier: None,
        tsv: false,
    });
    let config_path = cli.config.as_deref().map(eplace_intel::config::expand_home);
    let use_colors = eplace_intel::output::should_use_colors();

    match command {
        Commands::Init { force } => {
            let path = match config_path.map_or_else(eplace_intel::config::get_config_path, Ok) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(e) = eplace_intel::config::write_default_config(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Config written to {}", path.display());
        }
        Commands::List {
            min_score,
            tier,
            tsv,
        } => {
            let mut shown = load_leads(config_path, cli.input.as_deref());
            if let Some(min) = min_score {
                shown = eplace_intel::rank::filter_min_score(shown, min);
            }
            if let Some(tier) = tier {
                shown = eplace_intel::rank::filter_tier(shown, tier);
            }

            if tsv {
                let output = eplace_intel::output::format_tsv(&shown);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else {
                println!(
                    "{}",
                    eplace_intel::output::format_scored_table(&shown, use_colors)
                );
            }
        }
        Commands::Show { lead } => {
            let leads = load_leads(config_path, cli.input.as_deref());
            match eplace_intel::rank::find_lead(&leads, &lead) {
                Some(found) => {
                    println!(
                        "{}",
                        eplace_intel::output::format_lead_detail(found, use_colors)
                    );
                }
                None => {
                    eprintln!(
                        "No lead '{}'. Use an id or an index between 1 and {}.",
                        lead,
                        leads.len()
                    );
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Summary => {
            let leads = load_leads(config_path, cli.input.as_deref());
            let summary = eplace_intel::rank::summarize(&leads);
            println!(
                "{}",
                eplace_intel::output::format_summary(&summary, use_colors)
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load config and entities, then score and rank. Exits on any error.
fn load_leads(config_path: Option<PathBuf>, cli_input: Option<&str>) -> Vec<ScoredLead> {
    let config = match eplace_intel::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = eplace_intel::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let now = Utc::now();
    let thresholds = config.effective_tiers().thresholds();
    let options = match config.effective_ingest().options(now) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let input_path = match cli_input.or(config.input.as_deref()) {
        Some(p) => eplace_intel::config::expand_home(p),
        None => {
            eprintln!("No input file. Pass --input <FILE> or set `input` in the config file.");
            std::process::exit(EXIT_INPUT);
        }
    };

    let entities = match eplace_intel::ingest::load_entities(&input_path, &options) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    tracing::debug!(count = entities.len(), "scoring entities");
    eplace_intel::rank::score_entities(entities, &thresholds, now)
}
