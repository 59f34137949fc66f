use anyhow::Result;
use hppmerge::{cli::parse_args, run_hppmerge};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = parse_args()?;
    init_logging(config.verbosity);

    #[cfg(feature = "restore")]
    {
        if let Some(input) = &config.restore_input {
            let written =
                hppmerge::extract_from_amalgamation(input, config.restore_path.as_deref()).await?;
            println!("Restored {} file(s) from {}", written.len(), input.display());
            return Ok(());
        }
    }

    run_hppmerge(config).await
}
