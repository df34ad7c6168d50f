use std::process::ExitCode;

use tactile_paths::DrawingConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Tactile-Paths v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = DrawingConfig::config_path();
    let config = match DrawingConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    run(&config)
}

#[cfg(windows)]
fn run(config: &DrawingConfig) -> ExitCode {
    match tactile_paths::ui::window::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn run(config: &DrawingConfig) -> ExitCode {
    log::error!(
        "The drawing window needs Windows; configuration for a {}x{} canvas was not used",
        config.canvas_width,
        config.canvas_height
    );
    ExitCode::FAILURE
}
