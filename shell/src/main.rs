#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kero_lib::run().await
}
