use clap::{Parser, Subcommand};

use crate::{generate::GenerateArgs, solve::SolveArgs};

mod generate;
mod solve;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log construction steps
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs construction heuristics on a CVRPLIB instance
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Writes a random CVRPLIB instance
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args)?,
        Commands::Generate { args } => generate::run(args)?,
    }

    Ok(())
}
