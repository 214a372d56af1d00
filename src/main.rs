mod cli;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use emoji_cipher::{Alphabet, Codec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emoji_cipher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // A failed load is terminal: the codec never runs against a partial
    // or empty table.
    let loaded;
    let alphabet: &Alphabet = match &cli.alphabet {
        Some(path) => {
            loaded = Alphabet::load(path)?;
            &loaded
        }
        None => Alphabet::builtin(),
    };
    tracing::info!(
        letters = alphabet.letter_count(),
        symbols = alphabet.symbol_count(),
        "alphabet loaded"
    );

    let codec = Codec::new(alphabet);

    match cli.command {
        Command::Encode { text, variants, seed } => {
            if text.trim().is_empty() {
                tracing::warn!("input is empty; nothing to encode");
            }
            match seed {
                Some(seed) => {
                    let mut rng = ChaCha20Rng::seed_from_u64(seed);
                    for _ in 0..variants {
                        println!("{}", codec.encode_with_rng(&text, &mut rng));
                    }
                }
                None => {
                    let mut rng = rand::thread_rng();
                    for _ in 0..variants {
                        println!("{}", codec.encode_with_rng(&text, &mut rng));
                    }
                }
            }
        }
        Command::Decode { stream } => {
            println!("{}", codec.decode(&stream));
        }
        Command::Info { json } => {
            let summary = alphabet.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Letters: {}", summary.letters);
                println!("Symbols: {}", summary.symbols);
                println!("Longest symbol: {} scalars", summary.longest_symbol_scalars);
                for (letter, count) in &summary.symbols_per_letter {
                    println!("  {letter}: {count}");
                }
            }
        }
    }

    Ok(())
}
