use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    timetable::app::startup::startup().await
}
