use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::output::serialize;
use crate::rss::FeedSource;
use crate::TARGET_OUTPUT;

/// Everything one run needs, fixed once the command line has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub url: String,
    pub output: PathBuf,
    pub title: String,
    pub link: String,
}

/// Fetch the source feed, render it as RSS and overwrite the output file.
/// Returns the number of items written.
pub async fn run(request: &FeedRequest, source: &dyn FeedSource) -> AppResult<usize> {
    debug!(target: TARGET_OUTPUT, "Starting run for {}", request.url);

    let entries = source.fetch(&request.url).await?;
    let document = serialize(&entries, &request.title, &request.link);
    write_document(&request.output, &document).await?;

    info!(
        target: TARGET_OUTPUT,
        "Wrote {} items ({} bytes) to {}",
        entries.len(),
        document.len(),
        request.output.display()
    );
    Ok(entries.len())
}

async fn write_document(path: &Path, document: &str) -> AppResult<()> {
    tokio::fs::write(path, document)
        .await
        .map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::rss::{Entry, FeedFetcher};
    use async_trait::async_trait;

    struct StaticSource(Vec<Entry>);

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn fetch(&self, _url: &str) -> Result<Vec<Entry>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl FeedSource for FailingSource {
        async fn fetch(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
            Err(FetchError::Parse {
                url: url.to_string(),
                reason: "unknown format".to_string(),
            })
        }
    }

    fn request(output: PathBuf) -> FeedRequest {
        FeedRequest {
            url: "http://jobs.example.com/feed".to_string(),
            output,
            title: "My Feed".to_string(),
            link: "http://example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_output_parses_back_as_rss() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path().join("feed.xml"));
        let source = StaticSource(vec![Entry::new("L1", "T1"), Entry::new("L2", "T2")]);

        let written = run(&req, &source).await.unwrap();
        assert_eq!(written, 2);

        let bytes = std::fs::read(&req.output).unwrap();
        let feed = feed_rs::parser::parse(bytes.as_slice()).unwrap();

        assert_eq!(feed.title.unwrap().content, "My Feed");
        assert_eq!(
            feed.links.first().map(|l| l.href.trim_end_matches('/')),
            Some("http://example.com")
        );
        let titles: Vec<String> = feed
            .entries
            .into_iter()
            .map(|e| e.title.unwrap().content)
            .collect();
        assert_eq!(titles, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn test_local_fixture_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path().join("jobs.xml"));
        req.url = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/jobs.rss").to_string();

        let fetcher = FeedFetcher::new().unwrap();
        assert_eq!(run(&req, &fetcher).await.unwrap(), 3);

        let doc = std::fs::read_to_string(&req.output).unwrap();
        assert!(doc.contains("    <title>Math Teacher &amp; Coach</title>\n"));
        assert!(doc.contains("    <title>School Counselor &lt;Part-Time&gt;</title>\n"));
        assert_eq!(doc.matches("<item>").count(), 3);
    }

    #[tokio::test]
    async fn test_empty_feed_still_writes_channel() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path().join("empty.xml"));

        assert_eq!(run(&req, &StaticSource(Vec::new())).await.unwrap(), 0);

        let doc = std::fs::read_to_string(&req.output).unwrap();
        assert!(doc.contains("<channel>"));
        assert!(doc.contains("</channel>"));
        assert!(!doc.contains("<item>"));
    }

    #[tokio::test]
    async fn test_existing_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path().join("feed.xml"));
        std::fs::write(&req.output, "stale content that is much longer than nothing").unwrap();

        run(&req, &StaticSource(Vec::new())).await.unwrap();

        let doc = std::fs::read_to_string(&req.output).unwrap();
        assert!(doc.starts_with("<?xml"));
        assert!(!doc.contains("stale"));
    }

    #[tokio::test]
    async fn test_fetch_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path().join("feed.xml"));

        let err = run(&req, &FailingSource).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
        assert!(!req.output.exists());
    }

    #[tokio::test]
    async fn test_unwritable_output_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path().join("missing-dir").join("feed.xml"));

        let err = run(&req, &StaticSource(vec![Entry::new("L1", "T1")]))
            .await
            .unwrap_err();
        match err {
            AppError::Io { path, .. } => assert_eq!(path, req.output),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
