//! Parking Desk - operator CLI
//!
//! Records vehicle entries and exits against the remote parking API and
//! manages the rate tier catalog.
//!
//! ```sh
//! # Show the occupancy board (default config ~/.config/parking-desk/config.toml)
//! parking-desk records list
//!
//! # Record an entry now, on tier 2
//! parking-desk entry --plate "B 1234 XYZ" --tier 2
//!
//! # Preview, then record an exit
//! parking-desk exit 17 --dry-run
//! parking-desk exit 17
//!
//! # Validate config without talking to the API
//! parking-desk --check
//! ```

mod render;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use parking_desk::application::EntryRequest;
use parking_desk::config::AppConfig;
use parking_desk::domain::{compute_fee, RateTierId, RecordId, TierStatus};
use parking_desk::shared::{format_display, format_money, parse_form_input, AppError};
use parking_desk::{init_tracing, AppContext};

/// Parking Desk - fee engine and exit recording for a parking lot.
#[derive(Parser, Debug)]
#[command(
    name = "parking-desk",
    version,
    about = "Parking lot entry, exit and fee desk",
    long_about = "Parking Desk - records vehicle entries and exits against the remote \
                  parking API and computes hourly fees.\n\n\
                  Default config: ~/.config/parking-desk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the parking API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Use in-memory services seeded with sample tiers instead of the API.
    #[arg(long, global = true)]
    offline: bool,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rate tier catalog
    Tiers {
        #[command(subcommand)]
        action: TierAction,
    },
    /// Parking records
    Records {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Record a vehicle entry
    Entry {
        /// Plate number
        #[arg(short, long)]
        plate: String,
        /// Rate tier ID
        #[arg(short, long)]
        tier: String,
        /// Entry time (YYYY-MM-DD HH:MM), defaults to now
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveDateTime>,
    },
    /// Compute the fee and record a vehicle exit
    Exit {
        /// Parking record ID
        id: String,
        /// Exit time (YYYY-MM-DD HH:MM), defaults to now
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveDateTime>,
        /// Show the fee without recording the exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Compute a fee without touching any record
    Quote {
        #[arg(long, value_parser = parse_time)]
        entry: NaiveDateTime,
        #[arg(long, value_parser = parse_time)]
        exit: NaiveDateTime,
        /// Hourly rate
        #[arg(long)]
        rate: Decimal,
    },
}

#[derive(Subcommand, Debug)]
enum TierAction {
    /// List rate tiers
    List {
        /// Only tiers that can be chosen for new entries
        #[arg(long)]
        active: bool,
    },
    /// Add a rate tier
    Add {
        #[arg(short, long)]
        name: String,
        /// Hourly rate
        #[arg(short, long)]
        rate: Decimal,
        /// Aktif / Non-Aktif
        #[arg(short, long, default_value = "Aktif")]
        status: TierStatus,
    },
}

#[derive(Subcommand, Debug)]
enum RecordAction {
    /// Show the occupancy board
    List,
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, String> {
    parse_form_input(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ──────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(parking_desk::default_config_path);

    let mut config = match AppConfig::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if cli.check {
                println!("Configuration is invalid");
                println!("   Config file : {}", config_path.display());
                println!("   Error       : {}", e);
                std::process::exit(1);
            }
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ─────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref url) = cli.base_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config);
    info!("Configuration from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(problem) = config.validate() {
            println!("Configuration is invalid");
            println!("   Config file : {}", config_path.display());
            println!("   Problem     : {}", problem);
            std::process::exit(1);
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API base    : {}", config.api.base_url);
        println!("   Timeout     : {}s", config.api.request_timeout_secs);
        println!("   Log level   : {}", config.logging.level);
        println!("   Recheck     : {}", config.workflow.recheck_before_exit);
        return Ok(());
    }

    let Some(command) = cli.command else {
        println!("No command given, see --help");
        return Ok(());
    };

    let ctx = if cli.offline {
        AppContext::offline(config)
    } else {
        AppContext::connect(config)?
    };

    if let Err(e) = run(&ctx, command).await {
        eprintln!("Error: {}", e);
        // 1 for input problems, 2 when the remote API failed
        let code = match &e {
            AppError::Domain(err) if err.is_client_side() => 1,
            _ => 2,
        };
        std::process::exit(code);
    }
    Ok(())
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), AppError> {
    let currency = ctx.currency_symbol();

    match command {
        Command::Tiers {
            action: TierAction::List { active },
        } => {
            let manager = ctx.catalog_manager();
            let tiers = if active {
                manager.active_tiers().await?
            } else {
                manager.list_tiers().await?
            };
            println!("{}", render::tiers_table(&tiers, currency));
        }
        Command::Tiers {
            action: TierAction::Add { name, rate, status },
        } => {
            match ctx.catalog_manager().add_tier(&name, rate, status).await? {
                Some(tier) => println!("Tier {} added with ID {}", tier.name, tier.id),
                None => println!("Tier {} added", name.trim()),
            }
        }
        Command::Records {
            action: RecordAction::List,
        } => {
            let snapshot = ctx.occupancy_board().snapshot().await?;
            println!("{}", render::board_table(&snapshot, currency));
        }
        Command::Entry { plate, tier, at } => {
            let receipt = ctx
                .entry_service()
                .record_entry(EntryRequest {
                    plate_number: plate,
                    rate_tier_id: Some(RateTierId::new(tier)),
                    entry_at: at,
                })
                .await?;
            println!(
                "{} entered on {} ({}/h) at {}",
                receipt.plate_number,
                receipt.tier.name,
                format_money(currency, receipt.tier.hourly_rate),
                format_display(receipt.entry_at),
            );
            if let Some(record) = receipt.record {
                println!("Record ID {}", record.id);
            }
        }
        Command::Exit { id, at, dry_run } => {
            let workflow = ctx.exit_workflow();
            let mut form = workflow.open(&RecordId::new(id)).await?;
            if let Some(at) = at {
                form.set_exit_time(at)?;
            }
            println!("{}", render::exit_form_lines(&form, currency));

            if dry_run {
                return Ok(());
            }
            let receipt = workflow.confirm(&form).await?;
            println!(
                "Exit recorded for {}, fee {}",
                receipt.plate_number,
                format_money(currency, receipt.quote.fee)
            );
        }
        Command::Quote { entry, exit, rate } => {
            let quote = compute_fee(entry, exit, rate)?;
            println!("{}", render::quote_lines(&quote, currency));
        }
    }
    Ok(())
}
