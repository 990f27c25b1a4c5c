//! valuegen CLI - Deterministic value-object source synthesis
//!
//! Commands:
//! - `valuegen generate` - Synthesize source files from a valuegen.toml manifest
//! - `valuegen check` - Validate a valuegen.toml manifest

use clap::{Parser, Subcommand};

mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "valuegen")]
#[command(author, version, about = "Source synthesis for value objects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize source files from a manifest
    Generate {
        /// Path to valuegen.toml (default: ./valuegen.toml)
        #[arg(short, long)]
        manifest: Option<String>,

        /// Output directory for generated files
        #[arg(short, long, default_value = "generated")]
        output: String,

        /// Summary format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a valuegen.toml manifest
    Check {
        /// Path to valuegen.toml (default: ./valuegen.toml)
        #[arg(short, long)]
        manifest: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            manifest,
            output,
            format,
        } => {
            generate::run(manifest, &output, &format)?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
    }

    Ok(())
}
