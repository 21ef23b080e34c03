use colored::Colorize;
use ots_protocol::{OlcpCodec, OlcpProcedure};
use ots_service::ServiceConfig;

use crate::cli::*;
use crate::peripheral;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    match cli.command {
        Command::Run(args) => peripheral::run(&config, args.conn).await,
        Command::Decode(args) => cmd_decode(args),
        Command::Config => cmd_config(&config),
    }
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let data = hex::decode(args.hex.trim())?;
    match OlcpCodec::decode(&data) {
        Ok(OlcpProcedure::GoTo(id)) => {
            println!("{} GoTo {}", "✓".green().bold(), id.to_string().cyan());
        }
        Ok(OlcpProcedure::Unsupported(op)) => {
            println!("{} opcode {:#04x} is not supported", "!".yellow().bold(), op);
        }
        Ok(procedure) => println!("{} {}", "✓".green().bold(), procedure.name()),
        Err(e) => println!("{} {} (ATT error {:#04x})", "✗".red().bold(), e, e.code()),
    }
    Ok(())
}

fn cmd_config(config: &ServiceConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
