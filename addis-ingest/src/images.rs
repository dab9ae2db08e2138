//! Content-addressed local storage for downloaded post images.
//!
//! Filenames are the hex MD5 of the source URL plus a fixed `.jpg` suffix
//! (whatever the real content type is — the site serves them verbatim).
//! An existing file short-circuits the fetch entirely; that existence
//! check is the pipeline's only caching layer.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use addis_http::HttpClient;

/// Counters for one run, reported in the final summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub downloaded: u64,
    pub cached: u64,
    pub failed: u64,
}

pub struct ImageStore {
    dir: PathBuf,
    public_prefix: String,
    http: HttpClient,
    downloaded: AtomicU64,
    cached: AtomicU64,
    failed: AtomicU64,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>, http: HttpClient) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into(),
            http,
            downloaded: AtomicU64::new(0),
            cached: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Local filename for a source URL: hex MD5 of the URL string + `.jpg`.
    ///
    /// ```
    /// use addis_ingest::images::ImageStore;
    ///
    /// assert_eq!(
    ///     ImageStore::filename_for("http://x.fbcdn.net/a.jpg"),
    ///     "a1989bda4217099f8c7853c44e683b31.jpg"
    /// );
    /// ```
    pub fn filename_for(url: &str) -> String {
        format!("{:x}.jpg", md5::compute(url.as_bytes()))
    }

    /// Fetch a URL into the store, returning its site-relative path, or
    /// `None` when the download failed. Failures are logged and recovered;
    /// they never abort the run.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let name = Self::filename_for(url);
        let path = self.dir.join(&name);
        let public = format!("{}/{}", self.public_prefix, name);

        if path.exists() {
            self.cached.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(file = %name, "image.cached");
            return Some(public);
        }

        match self.download_to(url, &path).await {
            Ok(len) => {
                self.downloaded.fetch_add(1, Ordering::Relaxed);
                tracing::info!(file = %name, bytes = len, "image.downloaded");
                Some(public)
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(url = %truncate(url, 50), error = %err, "image.failed");
                None
            }
        }
    }

    async fn download_to(&self, url: &str, path: &Path) -> anyhow::Result<usize> {
        let body = self.http.get_bytes(url).await?;
        // Plain truncate-create write, no temp-file-then-rename. A crash
        // mid-write leaves a short file that later runs treat as already
        // downloaded; known limitation of the original cleaner, kept.
        tokio::fs::write(path, &body).await?;
        Ok(body.len())
    }

    pub fn stats(&self) -> ImageStats {
        ImageStats {
            downloaded: self.downloaded.load(Ordering::Relaxed),
            cached: self.cached.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
