#[tokio::main]
async fn main() {
    if let Err(e) = bitecheck_lib::run().await {
        tracing::error!("{e}");
        eprintln!("bitecheck: {e}");
        std::process::exit(1);
    }
}
