//! CLI argument definitions using clap
//!
//! Commands:
//! - venue-models construct --entity <kind> [--input <path>] [--config <path>]
//! - venue-models unserialize ...
//! - venue-models serialize ...
//! - venue-models validate ...

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::entities::{FundingLoan, FundingTicker, LedgerEntry, PublicTrade, TradingTicker};
use crate::model::Model;

/// venue-models - transform and validate positional venue entities
#[derive(Parser, Debug)]
#[command(name = "venue-models")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build entity instances, derived fields included
    Construct(TransformArgs),

    /// Map input to plain named-field records
    Unserialize(TransformArgs),

    /// Write input back in the positional wire form
    Serialize(TransformArgs),

    /// Check input against the entity's validators
    Validate(TransformArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Construct(_) => "construct",
            Command::Unserialize(_) => "unserialize",
            Command::Serialize(_) => "serialize",
            Command::Validate(_) => "validate",
        }
    }

    pub fn args(&self) -> &TransformArgs {
        match self {
            Command::Construct(args)
            | Command::Unserialize(args)
            | Command::Serialize(args)
            | Command::Validate(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    /// Entity type of the input
    #[arg(long, value_enum)]
    pub entity: EntityKind,

    /// JSON input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Entity types known to the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    LedgerEntry,
    TradingTicker,
    FundingTicker,
    FundingLoan,
    PublicTrade,
}

impl EntityKind {
    pub fn entity_name(&self) -> &'static str {
        match self {
            EntityKind::LedgerEntry => LedgerEntry::ENTITY,
            EntityKind::TradingTicker => TradingTicker::ENTITY,
            EntityKind::FundingTicker => FundingTicker::ENTITY,
            EntityKind::FundingLoan => FundingLoan::ENTITY,
            EntityKind::PublicTrade => PublicTrade::ENTITY,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
