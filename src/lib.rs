//! # hppmerge Library
//!
//! This crate can be used to:
//!
//! - Inline a root header and every quoted `#include` it reaches into one file
//! - Split a generated file back into its individual sources
//!
//! ## Usage
//!
//! ### To build a single-file amalgamation:
//!
//! ```rust,no_run
//! use hppmerge::{Config, run_hppmerge};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::new("mylib.hpp");
//!     config.version_label = "1.4.0".to_string();
//!
//!     run_hppmerge(config).await
//! }
//! ```
//!
//! ### To expand in memory without writing anything:
//!
//! ```rust,no_run
//! use hppmerge::Resolver;
//!
//! let text = Resolver::new("include").resolve("mylib.hpp")?;
//! # Ok::<(), hppmerge::ResolveError>(())
//! ```

pub mod cli;
pub mod directive;
pub mod error;
#[cfg(feature = "restore")]
pub mod extractor;
pub mod markers;
pub mod resolver;
pub mod writer;

pub use cli::Config;
pub use error::ResolveError;
#[cfg(feature = "restore")]
pub use extractor::{ExtractedFile, extract_from_amalgamation, split_amalgamation};
pub use resolver::{Resolver, resolve};
pub use writer::AmalgamationWriter;

use anyhow::{Context, Result};
use log::info;

/// Resolve the configured root and write the bannered result to the output path.
///
/// Nothing is written if resolution fails.
pub async fn run_hppmerge(config: Config) -> Result<()> {
    let resolver = Resolver::new(&config.source_dir).strict(config.strict);
    let body = resolver.resolve(&config.root).with_context(|| {
        format!(
            "Failed to resolve {}",
            config.source_dir.join(&config.root).display()
        )
    })?;

    let mut writer = AmalgamationWriter::create(&config.output_path).await?;
    writer
        .write_amalgamation(&config.version_label, &body)
        .await?;
    writer.flush().await?;

    info!("Wrote {}", config.output_path.display());
    println!(
        "Built {} to {} as version {}",
        config.source_dir.join(&config.root).display(),
        config.output_path.display(),
        config.version_label
    );

    Ok(())
}
