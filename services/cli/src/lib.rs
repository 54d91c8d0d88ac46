mod cli;
mod commands;
mod render;

use lead_intel::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
