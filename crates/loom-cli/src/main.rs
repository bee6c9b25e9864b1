//! loom CLI entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    loom_cli::run().await
}
