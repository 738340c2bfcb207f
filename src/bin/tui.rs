use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    folio::tui::run().await
}
