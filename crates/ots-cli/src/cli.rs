use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ots-peripheral",
    about = "Object Transfer Service sample peripheral",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML service configuration; defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Host the sample objects and drive them with a scripted peer
    Run(RunArgs),
    /// Decode a hex-encoded list control point write
    Decode(DecodeArgs),
    /// Print the effective service configuration
    Config,
}

#[derive(Args)]
pub struct RunArgs {
    /// Connection handle the scripted peer uses
    #[arg(long, default_value = "0")]
    pub conn: u16,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Bytes of the write, e.g. 05000100000000
    pub hex: String,
}
