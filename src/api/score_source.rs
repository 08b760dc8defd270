use std::path::PathBuf;
use std::time::Duration;

const DOCUMENT_NAME: &str = "scores.json";
const CACHE_BUSTER: &str = "nocache";

/// Where the scores document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreSource {
    Http { url: String, timeout: Duration },
    File { path: PathBuf },
}

impl ScoreSource {
    pub fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    /// `base` is either the document URL itself or the directory serving `scores.json`.
    pub fn http(base: &str, timeout: Duration) -> Self {
        let url = if base.ends_with(".json") {
            base.to_string()
        } else {
            format!("{}/{}", base.trim_end_matches('/'), DOCUMENT_NAME)
        };
        Self::Http { url, timeout }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Document URL with the cache-defeating query parameter appended.
    pub fn request_url(url: &str, nocache: i64) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", url, separator, CACHE_BUSTER, nocache)
    }
}

impl std::fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { url, .. } => f.write_str(url),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}
