//! Kodegen Prebuilt Framework - inspect and stage prebuilt Apple frameworks.
//!
//! This binary answers slice, link and preprocessor queries for configured framework
//! rules and stages their bundles into the generated-output tree.

use kodegen_prebuilt_framework::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
