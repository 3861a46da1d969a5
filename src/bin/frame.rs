//! riak-frame
//!
//! Builds request frames from the command line and inspects raw frames.
//! Handy for checking what a command puts on the wire.

use clap::{Args as ClapArgs, Parser, Subcommand};
use riak_command::command::{
    build_request_frame, FetchCounterCommand, FetchIndexCommand, FetchMapCommand,
    FetchSchemaCommand, FetchSetCommand, SearchCommand, UpdateCounterCommand,
};
use riak_command::protocol::{split_frame, MessageCode};
use riak_command::{CommandHandle, Result, RiakError};
use tracing_subscriber::{fmt, EnvFilter};

/// Riak frame tool
#[derive(Parser, Debug)]
#[command(name = "riak-frame")]
#[command(about = "Encode and inspect Riak protocol-buffers frames")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the request frame of a command as hex
    Encode {
        #[command(subcommand)]
        command: EncodeCommand,
    },

    /// Describe a hex-encoded frame
    Inspect {
        /// Frame bytes as hex, length prefix included
        hex: String,
    },
}

#[derive(ClapArgs, Debug)]
struct Location {
    /// Bucket type
    #[arg(short = 't', long, default_value = "default")]
    bucket_type: String,

    /// Bucket
    #[arg(short, long)]
    bucket: String,

    /// Key
    #[arg(short, long)]
    key: String,
}

#[derive(Subcommand, Debug)]
enum EncodeCommand {
    /// Fetch a counter
    FetchCounter(Location),

    /// Fetch a set
    FetchSet(Location),

    /// Fetch a map
    FetchMap(Location),

    /// Increment a counter
    UpdateCounter {
        #[command(flatten)]
        location: Location,

        /// Amount to add
        #[arg(short, long, allow_hyphen_values = true)]
        increment: i64,
    },

    /// Fetch one search index, or all of them
    FetchIndex {
        /// Index name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fetch a search schema
    FetchSchema {
        /// Schema name
        #[arg(short, long)]
        name: String,
    },

    /// Run a search query
    Search {
        /// Index name
        #[arg(short, long)]
        index: String,

        /// Query string
        #[arg(short, long)]
        query: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,riak_command=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Encode { command } => encode(command),
        Commands::Inspect { hex } => inspect(&hex),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn encode(command: EncodeCommand) -> Result<()> {
    let cmd: CommandHandle = match command {
        EncodeCommand::FetchCounter(loc) => Box::new(
            FetchCounterCommand::builder()
                .bucket_type(loc.bucket_type)
                .bucket(loc.bucket)
                .key(loc.key)
                .build()?,
        ),
        EncodeCommand::FetchSet(loc) => Box::new(
            FetchSetCommand::builder()
                .bucket_type(loc.bucket_type)
                .bucket(loc.bucket)
                .key(loc.key)
                .build()?,
        ),
        EncodeCommand::FetchMap(loc) => Box::new(
            FetchMapCommand::builder()
                .bucket_type(loc.bucket_type)
                .bucket(loc.bucket)
                .key(loc.key)
                .build()?,
        ),
        EncodeCommand::UpdateCounter {
            location,
            increment,
        } => Box::new(
            UpdateCounterCommand::builder()
                .bucket_type(location.bucket_type)
                .bucket(location.bucket)
                .key(location.key)
                .increment(increment)
                .build()?,
        ),
        EncodeCommand::FetchIndex { name } => {
            let mut builder = FetchIndexCommand::builder();
            if let Some(name) = name {
                builder = builder.index_name(name);
            }
            Box::new(builder.build()?)
        }
        EncodeCommand::FetchSchema { name } => {
            Box::new(FetchSchemaCommand::builder().schema_name(name).build()?)
        }
        EncodeCommand::Search { index, query } => Box::new(
            SearchCommand::builder()
                .index_name(index)
                .query(query)
                .build()?,
        ),
    };

    let frame = build_request_frame(cmd.as_ref())?;
    tracing::debug!(command = cmd.name(), len = frame.len(), "built request frame");
    println!("{}", hex::encode(&frame));
    Ok(())
}

fn inspect(input: &str) -> Result<()> {
    let frame = from_hex(input)?;
    let (code, payload) = split_frame(&frame)?;

    let name = MessageCode::try_from(code)
        .map(MessageCode::name)
        .unwrap_or("unknown");

    println!("length:  {}", payload.len() + 1);
    println!("code:    {} ({})", code, name);
    println!("payload: {} bytes", payload.len());
    Ok(())
}

fn from_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|e| RiakError::Config(format!("invalid hex frame: {}", e)))
}
