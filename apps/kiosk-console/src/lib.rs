//! # kiosk-console: Charity Ticket Kiosk for the Terminal
//!
//! Wires configuration, logging and the operator console around
//! [`kiosk_core`].
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Charity Ticket Kiosk                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   Terminal (stdin / stdout)                      │  │
//! │  │   prompts, pricing sheet, receipts, summary                      │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ one line at a time                    │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │                    kiosk-console (this crate)                    │  │
//! │  │                                                                  │  │
//! │  │  console.rs ──► prompt / read / normalize / confirm             │  │
//! │  │  admin.rs ────► PIN gate, sections, charity percentage          │  │
//! │  │  purchase.rs ─► Browsing → ... → OfferingReceipt state machine  │  │
//! │  │  config.rs ───► kiosk.toml + KIOSK_* environment                │  │
//! │  │                                                                  │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                           kiosk-core                             │  │
//! │  │  SectionRegistry, Money, validation, PricingSheet, SalesSummary  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Sequence
//! 1. Initialize tracing (stderr, so stdout stays the customer's screen)
//! 2. Load configuration
//! 3. Admin setup behind the PIN gate
//! 4. Purchase loop until an operator quits with the PIN
//! 5. Print the sales summary
//! 6. Print "Exiting program..." no matter how the session ended

pub mod admin;
pub mod config;
pub mod console;
pub mod error;
pub mod purchase;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use kiosk_core::{SalesSummary, SectionRegistry};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub use admin::{AccessOutcome, AdminOutcome};
pub use config::KioskConfig;
pub use console::Console;
pub use error::{AppError, AppResult};
pub use purchase::{PurchaseFlow, PurchaseStats};

/// Printed as the very last line of every run.
pub const FAREWELL: &str = "\nExiting program...";

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The admin PIN was never entered correctly; nothing was sold.
    Denied,
    /// Sales ran and were closed by an operator.
    Completed {
        summary: SalesSummary,
        stats: PurchaseStats,
    },
}

/// Binary entry point.
///
/// Errors are logged, never propagated: the kiosk always says goodbye and
/// exits normally.
pub fn run() {
    init_tracing();

    info!("Starting charity ticket kiosk");

    let config_path = std::env::var_os("KIOSK_CONFIG").map(PathBuf::from);
    let result = KioskConfig::load(config_path)
        .map_err(AppError::from)
        .and_then(|config| {
            let mut console = Console::new(
                io::stdin().lock(),
                io::stdout().lock(),
                config.input.max_length,
            );
            run_session(&mut console, &config)
        });

    match result {
        Ok(SessionOutcome::Denied) => info!("Session ended at the PIN gate"),
        Ok(SessionOutcome::Completed { stats, .. }) => {
            info!(sales = stats.sales, receipts = stats.receipts, "Session completed")
        }
        Err(AppError::InputClosed) => warn!("Input closed, ending session"),
        Err(e) => error!(error = %e, "Session failed"),
    }

    println!("{}", FAREWELL);
}

/// Runs admin setup, the purchase loop and the closing summary.
///
/// Generic over the console streams so integration tests can script a whole
/// session.
pub fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &KioskConfig,
) -> AppResult<SessionOutcome> {
    let mut registry = SectionRegistry::new();

    let charity = match admin::admin_setup(console, config, &mut registry)? {
        AdminOutcome::Ready { charity } => charity,
        AdminOutcome::Denied => return Ok(SessionOutcome::Denied),
    };

    let packages = config.package_set()?;
    let stats = PurchaseFlow::new(config, &mut registry, packages, charity).run(console)?;

    let summary = SalesSummary::from_registry(charity, &registry);
    console.say(&summary.render())?;

    info!(
        tickets = summary.tickets_sold(),
        sales_cents = summary.total_sales.cents(),
        charity_cents = summary.total_charity.cents(),
        "Sales summary printed"
    );

    Ok(SessionOutcome::Completed { summary, stats })
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - default: `warn` (PIN lockouts, failed config)
/// - `RUST_LOG=kiosk_console=info` - sections, sales, receipts
/// - `RUST_LOG=debug` - every rejected line
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
