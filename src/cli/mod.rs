//! Command-line interface definitions.
//!
//! Defines the CLI structure for hedgepro using `clap`. Subcommands size a
//! single hedge, scan a games document for ranked opportunities, convert
//! American prices and manage the configuration file.

pub mod calc;
pub mod config;
pub mod convert;
pub mod output;
pub mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::domain::{AmericanOdds, PromoOffer, Rounding};
use crate::error::Result;

/// Sportsbook promo conversion calculator
#[derive(Parser, Debug)]
#[command(name = "hedgepro")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply the global output flags.
    pub fn configure_output(&self) {
        output::configure(output::OutputConfig::new(self.json, self.quiet));
        output::set_color(match self.color {
            ColorChoice::Auto if self.json => Some(false),
            ColorChoice::Auto => None,
            ColorChoice::Always => Some(true),
            ColorChoice::Never => Some(false),
        });
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size the hedge for one promo wager
    Calc(CalcArgs),

    /// Rank cross-book hedges across a games document
    Scan(ScanArgs),

    /// Show multiplier, decimal odds and implied probability for a price
    Convert(ConvertArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `hedgepro config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Promo types accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PromoArg {
    /// Stake-not-returned bonus bet
    Bonus,
    /// Percentage boost on winnings
    Boost,
    /// Refund of a losing stake as bonus bet credit
    NoSweat,
}

/// Promo terms shared by `calc` and `scan`.
#[derive(Args, Debug, Clone)]
pub struct OfferArgs {
    /// Promo type
    #[arg(long, value_enum)]
    pub promo: PromoArg,

    /// Promo stake in dollars
    #[arg(long)]
    pub stake: Decimal,

    /// Boost percentage for profit boosts
    #[arg(long, default_value = "50")]
    pub boost: Decimal,

    /// Refund conversion rate for no-sweat bets [default: from config]
    #[arg(long)]
    pub refund_rate: Option<Decimal>,

    /// Hedge stake rounding [default: from config]
    #[arg(long, value_enum)]
    pub round: Option<RoundArg>,
}

impl OfferArgs {
    /// Build the offer, falling back to `default_refund_rate` for no-sweats.
    #[must_use]
    pub fn to_offer(&self, default_refund_rate: Decimal) -> PromoOffer {
        match self.promo {
            PromoArg::Bonus => PromoOffer::bonus_bet(self.stake),
            PromoArg::Boost => PromoOffer::profit_boost(self.stake, self.boost),
            PromoArg::NoSweat => {
                PromoOffer::no_sweat(self.stake, self.refund_rate.unwrap_or(default_refund_rate))
            }
        }
    }
}

/// Hedge stake rounding accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoundArg {
    /// Keep the exact stake
    Exact,
    /// Whole dollars
    NearestUnit,
    /// Cents
    Cents,
}

impl From<RoundArg> for Rounding {
    fn from(round: RoundArg) -> Self {
        match round {
            RoundArg::Exact => Self::Exact,
            RoundArg::NearestUnit => Self::NearestUnit,
            RoundArg::Cents => Self::Cents,
        }
    }
}

/// Arguments for the `calc` subcommand.
#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub offer: OfferArgs,

    /// American price of the promo bet (e.g. +250)
    #[arg(long, allow_negative_numbers = true)]
    pub source: AmericanOdds,

    /// American price of the hedge bet (e.g. -300)
    #[arg(long, allow_negative_numbers = true)]
    pub hedge: AmericanOdds,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub offer: OfferArgs,

    /// Games document to scan
    #[arg(long)]
    pub games: PathBuf,

    /// Layout of the games document
    #[arg(long, value_enum, default_value = "events")]
    pub format: FormatArg,

    /// Book the promo is offered at, or "any"
    #[arg(long)]
    pub source_book: String,

    /// Book to hedge at, or "any"
    #[arg(long, default_value = "any")]
    pub hedge_book: String,

    /// Number of opportunities to show [default: from config]
    #[arg(long)]
    pub top: Option<usize>,

    /// Minimum guaranteed profit [default: from config]
    #[arg(long, allow_negative_numbers = true)]
    pub min_profit: Option<Decimal>,

    /// Scan as of this RFC 3339 instant, skipping started games and stale quotes
    #[arg(long)]
    pub as_of: Option<chrono::DateTime<chrono::Utc>>,
}

/// Games document layouts accepted by `scan`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Odds feed events with bookmakers and markets
    Events,
    /// Serialized game records
    Games,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// American prices to convert
    #[arg(required = true, allow_negative_numbers = true)]
    pub odds: Vec<AmericanOdds>,
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Calc(args) => calc::execute(&cli.config, &args),
        Commands::Scan(args) => scan::execute(&cli.config, &args),
        Commands::Convert(args) => convert::execute(&args),
        Commands::Config(ConfigCommand::Init { force }) => config::execute_init(&cli.config, force),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
    }
}
