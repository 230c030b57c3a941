use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing `.env` is the normal case.
    let _ = dotenvy::dotenv();
    env_logger::init();

    match power_fit::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
