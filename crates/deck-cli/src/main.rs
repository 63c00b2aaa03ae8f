//! Operator CLI for Deckhand.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use deck_share::config::DEFAULT_ORIGIN;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "deck",
    about = "Deckhand: personalized, shareable slide decks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the templates in the catalog
    Templates,

    /// Show the slides of a template
    Show {
        /// Template id
        template: String,
    },

    /// Customize a template and publish it under a share token
    Customize {
        /// Template id
        template: String,

        /// JSON customization payload
        #[arg(short, long)]
        payload: PathBuf,

        /// Origin the share link is built on
        #[arg(long, env = "DECK_ORIGIN", default_value = DEFAULT_ORIGIN)]
        origin: String,

        /// RNG seed for a reproducible share token
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the customization record to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the slide that follows another one
    Next {
        /// Flow family (template id)
        family: String,

        /// Current slide id
        slide: String,

        /// The recipient's answer as JSON, or plain text
        #[arg(short, long)]
        answer: Option<String>,

        /// Use the deck from a customization record instead of the catalog
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// Walk a template's flow from the first slide to the end
    Walk {
        /// Template id
        template: String,

        /// Answer given on a slide, as SLIDE=JSON (repeatable)
        #[arg(short, long = "answer", value_name = "SLIDE=JSON")]
        answers: Vec<String>,
    },

    /// Report required questions still unanswered in a record
    Check {
        /// Customization record file
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Generate share tokens
    Token {
        /// How many tokens to print
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// RNG seed for reproducible tokens
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Templates => commands::templates::run(),
        Commands::Show { template } => commands::show::run(&template),
        Commands::Customize {
            template,
            payload,
            origin,
            seed,
            output,
        } => {
            commands::customize::run(&template, &payload, &origin, seed, output.as_deref()).await
        }
        Commands::Next {
            family,
            slide,
            answer,
            record,
        } => commands::next::run(&family, &slide, answer.as_deref(), record.as_deref()),
        Commands::Walk { template, answers } => commands::walk::run(&template, &answers),
        Commands::Check { record } => commands::check::run(&record),
        Commands::Token { count, seed } => commands::token::run(count, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
