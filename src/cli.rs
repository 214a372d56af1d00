use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Emoji substitution cipher", long_about = None)]
pub struct Cli {
    /// Path to an alphabet mapping file (one LETTER,symbol1,...,symbolN
    /// record per line); defaults to the built-in alphabet
    #[arg(long, short = 'a', global = true)]
    pub alphabet: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode text into an emoji stream
    Encode {
        /// The text to encode (case-insensitive, accents folded)
        text: String,

        /// Number of random variants to print
        #[arg(long, short = 'n', default_value_t = 1)]
        variants: usize,

        /// Seed the symbol picker for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode an emoji stream back into text
    Decode {
        /// The emoji stream to decode
        stream: String,
    },
    /// Show a summary of the loaded alphabet
    Info {
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
