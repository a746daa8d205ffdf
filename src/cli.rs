//! Command-line handling.
//!
//! The documented flags are single-dash long options (`-url`, `-output`,
//! `-title`, `-link`). They are rewritten to their double-dash form before
//! clap sees them, so both spellings work.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{AppResult, FetchError};
use crate::pipeline::{self, FeedRequest};
use crate::rss::FeedSource;

const LONG_FLAGS: [&str; 4] = ["url", "output", "title", "link"];

#[derive(Parser, Debug)]
#[command(
    name = "jobfeed",
    version,
    about = "Fetch a job feed and re-publish its postings as a minimal RSS 2.0 file"
)]
struct Cli {
    /// Source feed URL (or local file) to fetch
    #[arg(long, value_name = "URL")]
    url: String,

    /// File to write the RSS document to, e.g. feed.xml
    #[arg(long, value_name = "PATH")]
    output: PathBuf,

    /// Text for the output feed's <title>
    #[arg(long)]
    title: String,

    /// Text for the output feed's <link>
    #[arg(long)]
    link: String,
}

impl From<Cli> for FeedRequest {
    fn from(cli: Cli) -> Self {
        FeedRequest {
            url: cli.url,
            output: cli.output,
            title: cli.title,
            link: cli.link,
        }
    }
}

/// Rewrite `-url value` / `-url=value` into `--url ...` for the known flags.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || past_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                past_separator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Parse the process arguments into a request. No I/O happens here.
pub fn parse_request<I, T>(args: I) -> Result<FeedRequest, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_from(normalize_args(args)).map(FeedRequest::from)
}

/// Parse arguments, then build the source and run the pipeline. Usage
/// errors return before `connect` is called.
pub async fn run<I, T, S, F>(args: I, connect: F) -> AppResult<usize>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    S: FeedSource,
    F: FnOnce() -> Result<S, FetchError>,
{
    let request = parse_request(args)?;
    let source = connect()?;
    pipeline::run(&request, &source).await
}
