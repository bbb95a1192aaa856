use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    agrichat_lib::run().await
}
