//! Warden CLI
//!

#![deny(missing_docs)]

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    warden_lib::cli().await
}
