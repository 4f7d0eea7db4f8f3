#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocabapp_client::run().await
}
