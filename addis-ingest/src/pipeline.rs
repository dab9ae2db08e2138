//! The run itself: load everything, normalize post by post, write once.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PipelineConfig;
use crate::facebook::normalize_post;
use crate::facebook::types::{NormalizedPost, RawPost};
use crate::images::{ImageStats, ImageStore};
use addis_http::HttpClient;

/// Parse the scraper export. Any read or parse failure is fatal; the run
/// aborts before writing anything.
pub async fn load_posts(path: &Path) -> Result<Vec<RawPost>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read scrape export: {}", path.display()))?;
    let posts: Vec<RawPost> = serde_json::from_str(&raw)
        .with_context(|| format!("scrape export is not a JSON array of posts: {}", path.display()))?;
    Ok(posts)
}

/// What one completed run did, for the console summary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub posts_seen: usize,
    pub posts_kept: usize,
    pub images: ImageStats,
    pub image_dir: PathBuf,
    pub output_json: PathBuf,
}

pub struct Pipeline {
    config: PipelineConfig,
    images: ImageStore,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let http = HttpClient::new()?;
        let images = ImageStore::new(&config.image_dir, config.public_prefix.clone(), http);
        Ok(Self { config, images })
    }

    /// Run the whole transform sequentially: every fetch completes before
    /// the next item is touched, and the cleaned dataset is written exactly
    /// once at the end.
    pub async fn run(&self) -> Result<RunSummary> {
        tokio::fs::create_dir_all(&self.config.image_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create image directory: {}",
                    self.config.image_dir.display()
                )
            })?;
        if let Some(parent) = self.config.output_json.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create output directory: {}", parent.display())
            })?;
        }

        let raw_posts = load_posts(&self.config.input_file).await?;
        tracing::info!(posts = raw_posts.len(), "pipeline.start");

        let mut kept: Vec<NormalizedPost> = Vec::new();
        for (idx, raw) in raw_posts.iter().enumerate() {
            // Ids count every raw post, so the kept sequence may have gaps.
            let id = idx as u64 + 1;
            if let Some(post) = normalize_post(raw, id, &self.images).await {
                kept.push(post);
            }
        }

        // serde_json pretty-printing is 2-space indented and leaves
        // non-ASCII text (most of this dataset is Amharic) unescaped.
        let rendered = serde_json::to_string_pretty(&kept)?;
        tokio::fs::write(&self.config.output_json, rendered)
            .await
            .with_context(|| {
                format!(
                    "failed to write cleaned dataset: {}",
                    self.config.output_json.display()
                )
            })?;

        let summary = RunSummary {
            posts_seen: raw_posts.len(),
            posts_kept: kept.len(),
            images: self.images.stats(),
            image_dir: self.config.image_dir.clone(),
            output_json: self.config.output_json.clone(),
        };
        tracing::info!(
            seen = summary.posts_seen,
            kept = summary.posts_kept,
            downloaded = summary.images.downloaded,
            cached = summary.images.cached,
            failed = summary.images.failed,
            "pipeline.done"
        );
        Ok(summary)
    }
}
