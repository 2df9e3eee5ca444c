mod core;
mod gui;
mod input;
mod playback;
mod plot;
mod video;

use crate::core::{load_series, pick_file, AppConfig, FileKind};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;

    let Some(data_path) = pick_file(FileKind::Spreadsheet) else {
        return Ok(());
    };
    let Some(video_path) = pick_file(FileKind::Video) else {
        return Ok(());
    };

    let series = match load_series(&data_path, &config.data) {
        Ok(series) => series,
        Err(e) => {
            log::error!("Error reading data: {}", e);
            return Ok(());
        }
    };

    gui::run(&video_path, series, config)
}
