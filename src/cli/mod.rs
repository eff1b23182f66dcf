//! Command-line interface - argument tree and shared command context.
//!
//! Parsing is done with clap; each subcommand group is handled by a module
//! under [`commands`].

/// Command handlers (product, sale, recap, widget)
pub mod commands;

use crate::{config::settings::Settings, core::sale::SaleItemInput, errors::Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;

/// Sako - record sales and review monthly revenue
///
/// Examples:
///   sako product add "Es Teh" 5000
///   sako sale record --item 1:2 --item 3:1
///   sako recap --month 2025-05 --export recap.txt --publish
///   sako widget
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML settings file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = crate::config::settings::DEFAULT_SETTINGS_PATH
    )]
    pub config: PathBuf,

    /// Database URL, e.g. `sqlite://sako.sqlite?mode=rwc`
    #[arg(long, env = "DATABASE_URL", value_name = "URL")]
    pub database_url: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),
    /// Record, list and delete sales
    #[command(subcommand)]
    Sale(SaleCommand),
    /// Show the monthly recap
    Recap(RecapArgs),
    /// Show the summary the widget currently displays
    Widget,
}

/// Product subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProductCommand {
    /// Add a new product
    Add {
        /// Product name
        name: String,
        /// Unit price in whole currency units (negative becomes 0)
        #[arg(allow_negative_numbers = true)]
        price: i64,
    },
    /// List active products
    List {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Change a product's name and price
    Update {
        /// Product id
        id: i64,
        /// New name
        name: String,
        /// New unit price (negative becomes 0)
        #[arg(allow_negative_numbers = true)]
        price: i64,
    },
    /// Delete a product (past sales keep it)
    Delete {
        /// Product id
        id: i64,
    },
}

/// Sale subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SaleCommand {
    /// Record a sale
    Record {
        /// Line item as `<product_id>:<quantity>`; repeat for more items
        #[arg(
            short,
            long = "item",
            value_name = "ID:QTY",
            required = true,
            value_parser = parse_item
        )]
        items: Vec<SaleItemInput>,
        /// Sale date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Sale time (HH:MM), defaults to now
        #[arg(short, long, value_parser = parse_time)]
        time: Option<NaiveTime>,
    },
    /// List the sales of one day
    List {
        /// Day to list (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Only show sales whose items contain this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Delete a sale and its items
    Delete {
        /// Sale id
        id: i64,
    },
}

/// Arguments of the `recap` command
#[derive(clap::Args, Debug, Clone)]
pub struct RecapArgs {
    /// Month to report (YYYY-MM), defaults to the current month
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<NaiveDate>,
    /// Number of top products to show, defaults to the settings value
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Write the recap document to this file
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,
    /// Publish the month's revenue summary for the widget
    #[arg(short, long)]
    pub publish: bool,
}

/// Parses `<product_id>:<quantity>`; a bare id means quantity 1.
pub fn parse_item(value: &str) -> std::result::Result<SaleItemInput, String> {
    let (id, quantity) = value.split_once(':').unwrap_or((value, "1"));
    let product_id = id
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid product id '{id}': {e}"))?;
    let quantity = quantity
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
    Ok(SaleItemInput {
        product_id,
        quantity,
    })
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}', expected YYYY-MM-DD: {e}"))
}

/// Parses `HH:MM`.
pub fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| format!("invalid time '{value}', expected HH:MM: {e}"))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|e| format!("invalid month '{value}', expected YYYY-MM: {e}"))
}

/// Shared data available to all commands.
pub struct AppContext {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Loaded application settings
    pub settings: Settings,
}

impl AppContext {
    /// Creates a new `AppContext` from a connection and settings.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self { database, settings }
    }
}

/// Dispatches a parsed command to its handler.
pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Product(cmd) => commands::product::handle(ctx, cmd).await,
        Command::Sale(cmd) => commands::sale::handle(ctx, cmd).await,
        Command::Recap(args) => commands::recap::handle(ctx, args).await,
        Command::Widget => commands::widget::handle(ctx).await,
    }
}
