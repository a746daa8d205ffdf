use anyhow::Result;
use jobfeed::cli;
use jobfeed::logging;
use jobfeed::rss::FeedFetcher;
use jobfeed::{AppError, FetchError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::configure_logging();

    let connect = || FeedFetcher::new().map_err(FetchError::Client);

    match cli::run(std::env::args_os(), connect).await {
        Ok(_) => Ok(()),
        // clap prints usage and picks the exit code (0 for --help)
        Err(AppError::Usage(err)) => err.exit(),
        Err(err) => Err(err.into()),
    }
}
