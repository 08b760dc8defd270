use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::api::ScoreSource;
use crate::util::dates;

/// Player name to points, in document order.
///
/// A repeated key keeps its first position and takes the latest value;
/// a `null` value reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, Option<i64>>")]
pub struct PlayerScores(IndexMap<String, i64>);

impl PlayerScores {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, points)| (name.as_str(), *points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, Option<i64>>> for PlayerScores {
    fn from(raw: IndexMap<String, Option<i64>>) -> Self {
        Self(
            raw.into_iter()
                .map(|(name, points)| (name, points.unwrap_or(0)))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for PlayerScores {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, points)| (key.into(), points)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameRecord {
    pub date: String,
    pub scores: PlayerScores,
}

/// The whole `scores.json` document. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScoreDocument {
    #[serde(default)]
    pub scores: PlayerScores,
    #[serde(default)]
    pub parties: Vec<GameRecord>,
}

/// Any reason a poll produced no document. All variants surface the same way.
#[derive(Debug)]
pub enum PollError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    Read { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "request failed: {e}"),
            Self::Status(status) => write!(f, "unexpected HTTP status {status}"),
            Self::Read { path, source } => write!(f, "could not read {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "scores document is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for PollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::Status(_) => None,
            Self::Read { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for PollError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status),
            None => Self::Request(e),
        }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[tracing::instrument(level = "trace")]
pub(crate) async fn get_scores(source: &ScoreSource) -> Result<ScoreDocument, PollError> {
    let body = match source {
        ScoreSource::Http { url, timeout } => {
            let client = http_client(url, *timeout)?;
            let url = ScoreSource::request_url(url, dates::epoch_millis());
            info!(url, "Fetching scores document");
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec()
        }
        ScoreSource::File { path } => {
            info!(path = %path.display(), "Reading scores document");
            tokio::fs::read(path).await.map_err(|source| PollError::Read {
                path: path.clone(),
                source,
            })?
        }
    };

    let document = parse_document(&body)?;
    info!(
        players = document.scores.len(),
        games = document.parties.len(),
        "Parsed scores document"
    );

    Ok(document)
}

/// Each request is bounded by `timeout`.
/// Loopback hosts bypass any system proxy.
fn http_client(url: &str, timeout: Duration) -> Result<reqwest::Client, PollError> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    if is_loopback(url) {
        builder = builder.no_proxy();
    }
    Ok(builder.build()?)
}

fn is_loopback(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

pub(crate) fn parse_document(body: &[u8]) -> Result<ScoreDocument, PollError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    const DOCUMENT: &str = r#"{
        "scores": { "Zoe": 3, "Alice": 5, "Bob": 1 },
        "parties": [
            { "date": "2024-01-01 10:00:00", "scores": { "Alice": 0, "Bob": 1 } },
            { "date": "2024-01-02 11:30:00", "scores": { "1": 1, "2": 0 } }
        ]
    }"#;

    #[test]
    fn keeps_document_key_order() {
        let doc = parse_document(DOCUMENT.as_bytes()).unwrap();

        assert_eq!(doc.scores.keys().collect::<Vec<_>>(), vec!["Zoe", "Alice", "Bob"]);
        assert_eq!(doc.parties.len(), 2);
        assert_eq!(doc.parties[0].scores.keys().collect::<Vec<_>>(), vec!["Alice", "Bob"]);
        assert_eq!(doc.parties[1].scores.get("1"), Some(1));
    }

    #[test]
    fn null_points_read_as_zero() {
        let doc = parse_document(br#"{"scores": {"Alice": null}, "parties": []}"#).unwrap();
        assert_eq!(doc.scores.get("Alice"), Some(0));
    }

    #[test]
    fn repeated_key_keeps_position_and_last_value() {
        let doc =
            parse_document(br#"{"scores": {"Alice": 1, "Bob": 2, "Alice": 7}, "parties": []}"#)
                .unwrap();

        assert_eq!(doc.scores.iter().collect::<Vec<_>>(), vec![("Alice", 7), ("Bob", 2)]);
    }

    #[test]
    fn rejects_non_json_body() {
        let err = parse_document(b"<html>404</html>").unwrap_err();
        assert!(matches!(err, PollError::Parse(_)));
    }

    #[test]
    fn missing_parties_read_as_no_games() {
        let doc = parse_document(br#"{"scores": {"Alice": 1}}"#).unwrap();

        assert_eq!(doc.scores.get("Alice"), Some(1));
        assert!(doc.parties.is_empty());
    }

    #[test]
    fn missing_scores_read_as_no_players() {
        let doc =
            parse_document(br#"{"parties": [{"date": "2024-01-01", "scores": {"Bob": 1}}]}"#)
                .unwrap();

        assert!(doc.scores.is_empty());
        assert_eq!(doc.parties.len(), 1);
    }

    #[test]
    fn recognises_loopback_hosts() {
        assert!(is_loopback("http://localhost:8000/scores.json"));
        assert!(is_loopback("http://127.0.0.1:8000/scores.json"));
        assert!(is_loopback("http://[::1]:8000/scores.json"));
        assert!(!is_loopback("https://example.org/scores.json"));
    }

    #[tokio::test]
    async fn reads_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let doc = get_scores(&ScoreSource::file(file.path())).await.unwrap();
        assert_eq!(doc.scores.get("Alice"), Some(5));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScoreSource::file(dir.path().join("scores.json"));

        let err = get_scores(&source).await.unwrap_err();
        assert!(matches!(err, PollError::Read { .. }));
    }

    /// Serves one canned HTTP response and hands back the request line it received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base, handle)
    }

    #[tokio::test]
    async fn fetches_document_over_http_with_cache_buster() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", DOCUMENT).await;
        let source = ScoreSource::http(&base, Duration::from_secs(5));

        let doc = get_scores(&source).await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(doc.scores.keys().collect::<Vec<_>>(), vec!["Zoe", "Alice", "Bob"]);
        assert_eq!(doc.parties.len(), 2);
        assert!(request_line.starts_with("GET /scores.json?nocache="), "{request_line}");
    }

    #[tokio::test]
    async fn non_success_status_is_a_poll_failure() {
        let (base, server) = serve_once("HTTP/1.1 404 Not Found", "{}").await;
        let source = ScoreSource::http(&base, Duration::from_secs(5));

        let err = get_scores(&source).await.unwrap_err();
        server.await.unwrap();

        assert!(
            matches!(err, PollError::Status(status) if status == reqwest::StatusCode::NOT_FOUND),
            "{err}"
        );
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = get_scores(&ScoreSource::http(&base, Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Request(_)), "{err}");
    }
}
