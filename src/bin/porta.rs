//! Porta command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Generate a 26x26 key from a shared seed and save it
//! porta keygen --seed porta --out porta-key.json
//!
//! # Encrypt and decrypt with the saved key
//! porta encrypt --key porta-key.json "Hello"
//! porta decrypt --key porta-key.json "639 836 057"
//!
//! # Walk through a simulated transmission
//! porta simulate --key porta-key.json "Meet at noon"
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use porta_cipher::{CharHandling, CipherConfig, Framing, Session};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Seeded bigram substitution cipher
#[derive(Parser, Debug)]
#[command(name = "porta")]
#[command(about = "Seeded 3-digit bigram substitution cipher")]
#[command(version)]
struct Args {
    /// JSON configuration whose values act as defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key and print or save it as JSON
    Keygen {
        /// Matrix size, 20 or 26
        #[arg(long)]
        size: Option<usize>,
        /// Shared seed; omit for a time-derived key
        #[arg(long)]
        seed: Option<String>,
        /// Comma-separated reserved codes
        #[arg(long)]
        reserved: Option<String>,
        /// Write the key here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Encrypt text with a saved key
    Encrypt {
        /// Key file produced by `keygen`
        #[arg(short, long)]
        key: PathBuf,
        /// space or concat
        #[arg(long)]
        framing: Option<Framing>,
        /// keep or drop digits
        #[arg(long)]
        digits: Option<CharHandling>,
        /// keep or drop symbols and other non-letters
        #[arg(long)]
        non_letters: Option<CharHandling>,
        /// keep or drop letters missing from the 20-letter alphabet
        #[arg(long)]
        excluded: Option<CharHandling>,
        /// Padding letter for odd-length input
        #[arg(long)]
        filler: Option<char>,
        /// Plain text
        text: String,
    },
    /// Decrypt code text with a saved key
    Decrypt {
        /// Key file produced by `keygen`
        #[arg(short, long)]
        key: PathBuf,
        /// space or concat
        #[arg(long)]
        framing: Option<Framing>,
        /// Padding letter to strip from the end
        #[arg(long)]
        filler: Option<char>,
        /// Code text
        text: String,
    },
    /// Show a sender/receiver walkthrough for a message
    Simulate {
        /// Key file produced by `keygen`
        #[arg(short, long)]
        key: PathBuf,
        /// Plain text
        text: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = match &args.config {
        Some(path) => CipherConfig::from_json(&fs::read_to_string(path)?)?,
        None => CipherConfig::default(),
    };

    match args.command {
        Command::Keygen {
            size,
            seed,
            reserved,
            out,
        } => {
            if let Some(size) = size {
                config.matrix_size = size;
            }
            if let Some(reserved) = reserved {
                config.reserved = reserved;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            let mut session = Session::new(config);
            session.generate(None)?;
            let json = session.export_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    tracing::info!("wrote key to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Encrypt {
            key,
            framing,
            digits,
            non_letters,
            excluded,
            filler,
            text,
        } => {
            if let Some(framing) = framing {
                config.framing = framing;
            }
            if let Some(digits) = digits {
                config.policy.digits = digits;
            }
            if let Some(non_letters) = non_letters {
                config.policy.non_letters = non_letters;
            }
            if let Some(excluded) = excluded {
                config.policy.excluded = excluded;
            }
            if let Some(filler) = filler {
                config.policy = config.policy.with_filler(filler);
            }
            let session = load_session(&key, config)?;
            println!("{}", session.encrypt(&text)?);
        }
        Command::Decrypt {
            key,
            framing,
            filler,
            text,
        } => {
            if let Some(framing) = framing {
                config.framing = framing;
            }
            if let Some(filler) = filler {
                config.policy = config.policy.with_filler(filler);
            }
            let session = load_session(&key, config)?;
            println!("{}", session.decrypt(&text)?);
        }
        Command::Simulate { key, text } => {
            let session = load_session(&key, config)?;
            let run = session.simulate(&text)?;

            println!("[sender] original: {}", run.original);
            println!("[sender] prepared: {}", run.prepared);
            for step in &run.sent {
                match step.code {
                    Some(code) => println!("  {} -> {}", step.pair, code),
                    None => println!("  {} -> cannot be encoded", step.pair),
                }
            }
            println!("[wire]   {}", run.wire);
            for step in &run.received {
                match &step.pair {
                    Some(pair) => println!("  {} -> {}", step.code, pair),
                    None => println!("  {} -> unknown (??)", step.code),
                }
            }
            println!("[receiver] decoded: {}", run.decoded);
            println!("[receiver] result:  {}", run.delivered);
            if run.succeeded() {
                println!("delivered intact");
            } else {
                println!("mismatch: expected {:?}, got {:?}", run.expected, run.delivered);
            }
        }
    }

    Ok(())
}

fn load_session(path: &Path, config: CipherConfig) -> Result<Session, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    let mut session = Session::new(config);
    session.import_json(&json)?;
    Ok(session)
}
