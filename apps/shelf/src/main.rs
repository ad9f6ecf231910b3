//! # Shelf Application Entry Point
//!
//! ## Startup Sequence
//! 1. Resolve configuration (database path, log filter)
//! 2. Initialize tracing (logging to stderr)
//! 3. Open the database & create the products table
//! 4. Open the product list controller and load the list
//! 5. Run the page until `quit` or end of input

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match shelf_app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shelf: {e}");
            ExitCode::FAILURE
        }
    }
}
