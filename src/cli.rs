use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gardenwatch")]
#[command(author, version, about = "Telegram bot that tracks the Grow a Garden shop stock", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling + background restock watcher)
    Run,

    /// Fetch the current stock once and print it
    Fetch {
        /// Only this category (seeds, gear, eggs, cosmetics, event)
        #[arg(short, long)]
        category: Option<String>,

        /// Print raw JSON instead of the formatted report
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
