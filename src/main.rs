use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    carebook_lib::init_tracing();

    match carebook_lib::run().await {
        Ok(report) => {
            tracing::info!(
                signed_in = report.signed_in,
                doctors = report.doctors,
                "Client ready"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}
