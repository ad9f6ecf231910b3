//! # Shelf Application Library
//!
//! Configures and runs the Shelf product page.
//!
//! ## Module Organization
//! ```text
//! shelf_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── products.rs ◄─── Shared product list (Arc<Mutex>)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── product.rs  ◄─── select / edit / save / delete commands
//! ├── page.rs         ◄─── Text page: input lines, re-render on events
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod page;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use page::ProductPage;
use shelf_core::ProductListController;
use shelf_db::{Database, DbConfig};
use state::{ConfigState, ProductListState};

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Resolve Configuration ────────────────────────────────────────────► │
/// │     • SHELF_DB_PATH or <data dir>/Products.db3                          │
/// │     • RUST_LOG or the default filter                                    │
/// │                                                                         │
/// │  2. Initialize Logging (stderr, so the page owns stdout) ─────────────► │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, products table created if missing          │
/// │                                                                         │
/// │  4. Open ProductListController (create table + initial load) ─────────► │
/// │                                                                         │
/// │  5. Run the page until `quit` or end of input, then close the pool ───► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigState::from_env()?;
    init_tracing(&config.log_filter);

    info!(path = %config.database_path.display(), "Starting Shelf");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database connected");

    let list = ProductListController::open(db.products())
        .await?
        .with_busy_text(config.busy_text.clone());
    let state = ProductListState::new(list);

    let page = ProductPage::new(state, tokio::io::stdout()).await;
    let result = page.run(BufReader::new(tokio::io::stdin())).await;

    db.close().await;
    result?;

    info!("Shelf stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shelf_core=trace` - Show trace for one crate only
/// - Default: [`state::config::DEFAULT_LOG_FILTER`]
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(state::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
