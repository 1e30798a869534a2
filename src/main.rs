use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    testgen_lib::run().await
}
