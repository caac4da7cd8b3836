use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    beauty_client::run().await
}
