use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match reservation_backend::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Service stopped: {}", e);
            eprintln!("reservation-backend: {}", e);
            ExitCode::FAILURE
        }
    }
}
