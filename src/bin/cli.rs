//! segkv CLI
//!
//! Encode and inspect tables, and read/write a file-backed store.

use clap::{Parser, Subcommand};
use segkv::card::{Card, Rank, Suit};
use segkv::codec::{count_segments, find_nested, TableBuilder, TableView};
use segkv::contract::CardContract;
use segkv::store::LogStore;
use segkv::{Config, Result, SegError, StoreAdapter};
use tracing_subscriber::{fmt, EnvFilter};

/// segkv CLI
#[derive(Parser, Debug)]
#[command(name = "segkv")]
#[command(about = "Segment/table codec and write-minimizing key-value store")]
#[command(version)]
struct Args {
    /// Data directory of the store
    #[arg(short, long, default_value = "./segkv_data")]
    data_dir: String,

    /// Separator between key path elements
    #[arg(short, long, default_value = "/")]
    separator: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode UTF-8 fields as a table and print it as hex
    Encode {
        /// Field bodies, in order
        fields: Vec<String>,
    },

    /// Count the fields of a hex table, or print one field
    Inspect {
        /// Table bytes as hex
        table: String,

        /// Dot-separated field path into nested tables (e.g. 0.1)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Write a value under a key path
    Put {
        /// Key path elements
        #[arg(required = true)]
        keys: Vec<String>,

        /// Value to store (empty deletes)
        #[arg(short, long)]
        value: String,
    },

    /// Read the value under a key path
    Get {
        /// Key path elements
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Card record operations
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CardCommands {
    /// Store a card
    Create {
        #[arg(long)]
        id: String,

        /// Suit number (1, 2, 4, 8)
        #[arg(long)]
        suit: i64,

        /// Rank number (1-13)
        #[arg(long)]
        rank: i64,

        #[arg(long)]
        played: bool,
    },

    /// Load a card
    Get {
        #[arg(long)]
        id: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,segkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .key_separator(args.separator.as_bytes())
        .build();

    match args.command {
        Commands::Encode { fields } => {
            let table = fields
                .iter()
                .fold(TableBuilder::new(), |builder, field| builder.segment_str(field))
                .finish();
            println!("{}", to_hex(&table));
        }
        Commands::Inspect { table, path } => {
            let bytes = parse_hex(&table)?;
            match path {
                Some(path) => {
                    let indices = parse_path(&path)?;
                    match find_nested(&bytes, &indices)? {
                        Some(body) => println!("{}", to_hex(body)),
                        None => println!("(absent)"),
                    }
                }
                None => {
                    let view = TableView::new(&bytes);
                    println!("{} fields", count_segments(&bytes)?);
                    for (i, body) in view.iter().enumerate() {
                        println!("  [{}] {}", i, to_hex(body?));
                    }
                }
            }
        }
        Commands::Put { keys, value } => {
            let adapter = StoreAdapter::from_config(LogStore::open(&config)?, &config)?;
            let state = adapter.put_path(&keys, value.as_bytes())?;
            adapter.store().sync()?;
            println!("{}", state);
        }
        Commands::Get { keys } => {
            let adapter = StoreAdapter::from_config(LogStore::open(&config)?, &config)?;
            let value = adapter.get_path(&keys)?;
            println!("{}", String::from_utf8_lossy(&value));
        }
        Commands::Card { command } => {
            let adapter = StoreAdapter::from_config(LogStore::open(&config)?, &config)?;
            let contract = CardContract::new(adapter);
            match command {
                CardCommands::Create {
                    id,
                    suit,
                    rank,
                    played,
                } => {
                    let card = Card::new(id, Suit::try_from(suit)?, Rank::try_from(rank)?, played);
                    let state = contract.create(&card)?;
                    contract.adapter().store().sync()?;
                    println!("{} {}", state, to_hex(&card.to_table()));
                }
                CardCommands::Get { id } => match contract.get(id.as_bytes())? {
                    Some(card) => println!("{:?}", card),
                    None => println!("(absent)"),
                },
            }
        }
    }

    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(SegError::InvalidArgument(
            "hex input has an odd number of digits".to_string(),
        ));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            text.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| SegError::InvalidArgument(format!("invalid hex at position {}", i)))
        })
        .collect()
}

fn parse_path(path: &str) -> Result<Vec<usize>> {
    path.split('.')
        .map(|part| {
            part.parse()
                .map_err(|_| SegError::InvalidArgument(format!("invalid path element: {}", part)))
        })
        .collect()
}
