mod cli;
mod commands;
mod infra;

use cv_screen::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
