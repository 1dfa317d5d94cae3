use std::path::PathBuf;

use anyhow::Result;
use caser::config::CaserConfig;
use caser::RuleRegistry;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "caser", version, about = "Detect and convert identifier casing styles")]
struct Cli {
    /// Config file with extra rules (default: ~/.caser/config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the casing rule TEXT is written in, or "unknown"
    Detect {
        text: String,
    },

    /// Convert TEXT to another casing rule
    Convert {
        text: String,

        /// Target rule, e.g. kebab-case
        #[arg(short, long)]
        to: String,

        /// Source rule; detected when omitted
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Print the words of TEXT, one per line
    Tokenize {
        text: String,
    },

    /// List registered rules in detection priority order
    Rules,

    /// Start the MCP stdio server
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = load_registry(cli.config)?;

    match cli.command {
        Commands::Detect { text } => {
            println!("{}", registry.wrap(text).detect());
        }

        Commands::Convert { text, to, from } => {
            let text = registry.wrap(text);
            let converted = match from {
                Some(from) => text.convert(&from, &to)?,
                None => text.convert_to(&to)?,
            };
            println!("{converted}");
        }

        Commands::Tokenize { text } => {
            for word in registry.wrap(text).words() {
                println!("{word}");
            }
        }

        Commands::Rules => {
            println!("{:<25} {:<10} {}", "RULE", "SEPARATOR", "CASE");
            println!("{}", "-".repeat(46));
            for rule in registry.summaries() {
                println!("{:<25} {:<10} {}", rule.name, format!("{:?}", rule.separator), rule.case);
            }
        }

        Commands::Serve => {
            caser::server::stdio::run(registry).await?;
        }
    }

    Ok(())
}

fn load_registry(config: Option<PathBuf>) -> Result<RuleRegistry> {
    let config = CaserConfig::resolve(config.as_deref())?;
    config.build_registry()
}
