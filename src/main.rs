use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = gistbank::args::parse();
    gistbank::cli::main(args).await
}
