use addis_common::observability::{init_logging, LogConfig};
use addis_ingest::config::PipelineConfig;
use addis_ingest::pipeline::Pipeline;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LogConfig {
        mirror_stderr: true,
        ..LogConfig::default()
    })?;

    println!("Starting LIVE-ADDIS scrape cleanup...");

    let config = PipelineConfig::default();
    let summary = Pipeline::new(config)?.run().await?;

    println!();
    println!(
        "Processed {} posts ({} kept)",
        summary.posts_seen, summary.posts_kept
    );
    println!(
        "Images: {} downloaded, {} reused, {} failed",
        summary.images.downloaded, summary.images.cached, summary.images.failed
    );
    println!("Images saved to: {}", summary.image_dir.display());
    println!("Clean data saved to: {}", summary.output_json.display());
    Ok(())
}
