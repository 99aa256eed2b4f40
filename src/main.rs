use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    uia_bridge::cli::run().await
}
