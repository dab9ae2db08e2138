use serde::Deserialize;
use std::path::PathBuf;

/// Paths and the public URL prefix for one pipeline run.
///
/// The defaults are the fixed locations inside the site checkout; the
/// binary runs with them as-is. There are no CLI flags or environment
/// overrides for these.
///
/// ```
/// use addis_ingest::config::PipelineConfig;
///
/// let cfg = PipelineConfig::default();
/// assert_eq!(cfg.public_prefix, "/images/posts");
/// assert!(cfg.output_json.ends_with("clean_data.json"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Raw scraper export (JSON array of post mappings).
    pub input_file: PathBuf,
    /// Directory that receives the content-addressed image files.
    pub image_dir: PathBuf,
    /// Cleaned dataset consumed by the site build.
    pub output_json: PathBuf,
    /// Prefix under which `image_dir` is served by the site.
    pub public_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("public/live-addis-facebook-scrap.json"),
            image_dir: PathBuf::from("public/images/posts"),
            output_json: PathBuf::from("src/data/clean_data.json"),
            public_prefix: "/images/posts".to_string(),
        }
    }
}
