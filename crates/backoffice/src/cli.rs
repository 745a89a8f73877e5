//! Command-line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::app::App;
use crate::config::{Config, EnvReader, Theme};
use crate::model::{ProductStatus, Role, UserStatus};
use crate::output::OutputMode;

#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about = "Manage users, products and analytics")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputMode>,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Colour scheme for styled output
    #[arg(long, global = true, value_enum)]
    pub theme: Option<Theme>,

    /// Multiplier on simulated service latency (0 disables it)
    #[arg(long, global = true, value_name = "SCALE")]
    pub latency_scale: Option<f64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Command-line flags win over every other layer.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(scale) = self.latency_scale {
            config.latency_scale = scale;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an email and password
    Login(LoginArgs),

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },

    /// Manage the product catalogue
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },

    /// Show analytics reports (dashboard by default)
    Analytics {
        #[command(subcommand)]
        command: Option<AnalyticsCommand>,
    },
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

/// Search, sort and paging flags shared by list commands.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,

    /// Field to sort by
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    List(UserListArgs),
    /// Show one user
    Show { id: String },
    /// Create a user
    Create(CreateUserArgs),
    /// Update fields of a user
    Update(UpdateUserArgs),
    /// Delete a user
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct UserListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    #[arg(long, value_enum)]
    pub role: Option<Role>,

    #[arg(long, value_enum)]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_enum, default_value_t = Role::User)]
    pub role: Role,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct UpdateUserArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, value_enum)]
    pub role: Option<Role>,
    #[arg(long, value_enum)]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    List(ProductListArgs),
    /// Show one product
    Show { id: String },
    /// Create a product
    Create(CreateProductArgs),
    /// Update fields of a product
    Update(UpdateProductArgs),
    /// Delete a product
    Delete { id: String },
    /// List product categories
    Categories,
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Exact category, or "all"
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<ProductStatus>,

    #[arg(long, value_name = "PRICE")]
    pub min_price: Option<f64>,

    #[arg(long, value_name = "PRICE")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CreateProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub category: String,
    #[arg(long, allow_negative_numbers = true)]
    pub stock: i64,
    #[arg(long, value_enum, default_value_t = ProductStatus::Active)]
    pub status: ProductStatus,
    /// Stock keeping unit; optional
    #[arg(long, default_value = "")]
    pub sku: String,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    /// Image URL; repeat for more
    #[arg(long = "image")]
    pub images: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UpdateProductArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub stock: Option<i64>,
    #[arg(long, value_enum)]
    pub status: Option<ProductStatus>,
    /// New SKU; an empty value clears it
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long)]
    pub tags: Option<String>,
    /// Replaces all images; repeat for more
    #[arg(long = "image")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Subcommand)]
pub enum AnalyticsCommand {
    /// Headline totals and growth
    #[default]
    Dashboard,
    /// Per-month aggregates
    Monthly,
    /// Revenue against target
    Revenue,
    /// New and returning users per week
    Growth,
    /// Most viewed pages
    Pages {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Sessions by traffic source
    Traffic,
    /// Conversion funnel stages
    Funnel,
    /// Key metric tiles
    Tiles,
    /// Live counters for today
    Realtime,
    /// Monthly figures as CSV
    Export,
}

/// Loads configuration, applies flags and runs the command.
pub fn run(cli: Cli, env: &dyn EnvReader) -> anyhow::Result<String> {
    let mut config =
        Config::load(cli.config.as_deref(), env).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    tracing::debug!(output = ?config.output, latency_scale = config.latency_scale, "starting");

    let mut app = App::new(config)?;
    app.handle(cli.command)
}
