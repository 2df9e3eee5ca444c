use eframe::egui;
use std::path::Path;
use std::time::Duration;

use crate::core::{AppConfig, DataSeries};
use crate::gui::trackbar::TrackbarWidget;
use crate::input::{self, KeyCommand};
use crate::playback::{length_mismatch, LoopControl, PlaybackController};
use crate::plot::{PlotView, PLOT_TITLE};
use crate::video::{FfmpegSource, FrameSource};

pub const VIDEO_WINDOW_TITLE: &str = "Slow Motion Video";

pub struct SlowMoApp<S: FrameSource> {
    pub controller: PlaybackController<S>,
    pub trackbar: TrackbarWidget,
    pub texture: Option<egui::TextureHandle>,
    /// Display generation the texture was built from.
    pub texture_generation: u64,
    pub tick_interval: Duration,
    pub closing: bool,
}

impl<S: FrameSource> SlowMoApp<S> {
    pub fn new(controller: PlaybackController<S>, config: &AppConfig) -> Self {
        Self {
            controller,
            trackbar: TrackbarWidget::new(),
            texture: None,
            texture_generation: 0,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            closing: false,
        }
    }

    /// Applies one key command. Returns `true` when the loop must end.
    pub fn apply_command(&mut self, command: Option<KeyCommand>) -> bool {
        match command {
            Some(command) => self.controller.handle_key(command) == LoopControl::Exit,
            None => false,
        }
    }

    pub fn status_text(&self) -> String {
        let mut status = format!(
            "{} | frame {} / {}",
            self.controller.state().display_text(),
            self.controller.current_frame(),
            self.controller.frame_count().saturating_sub(1)
        );
        match self.controller.current_sample() {
            Some((displacement, load)) => {
                status.push_str(&format!(" | {:.4} mm, {:.2} N", displacement, load));
            }
            None => status.push_str(" | no data for this frame"),
        }
        status
    }

    fn shutdown(&mut self, ctx: &egui::Context) {
        self.controller.quit();
        self.texture = None;
        self.closing = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let generation = self.controller.display_generation();
        if generation == self.texture_generation {
            return;
        }
        if let Some(displayed) = self.controller.displayed() {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(displayed.frame.size(), displayed.frame.rgba());
            self.texture = Some(ctx.load_texture("video_frame", color_image, egui::TextureOptions::LINEAR));
        }
        self.texture_generation = generation;
    }

    fn show_plot_window(&mut self, ctx: &egui::Context) {
        if self.controller.plot_mut().take_redraw() {
            ctx.request_repaint();
        }

        let plot = self.controller.plot();
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("load_displacement_plot"),
            egui::ViewportBuilder::default()
                .with_title(PLOT_TITLE)
                .with_inner_size([640.0, 480.0]),
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot.show(ui);
                });
            },
        );
    }
}

impl<S: FrameSource> eframe::App for SlowMoApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closing {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            log::info!("Video window closed");
            self.shutdown(ctx);
            return;
        }

        let command = ctx.input(input::poll_key);
        if self.apply_command(command) {
            self.shutdown(ctx);
            return;
        }

        self.controller.on_tick();
        self.sync_texture(ctx);

        let mut seek_to = None;
        let status = self.status_text();
        let position = self.controller.trackbar_position();
        let frame_count = self.controller.frame_count();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            seek_to = self.trackbar.show(ui, position, frame_count);
            ui.horizontal(|ui| {
                ui.label(status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{}: play/pause   {}: quit",
                        KeyCommand::TogglePause.label(),
                        KeyCommand::Quit.label()
                    ));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("No frame decoded yet");
                });
            }
        });

        if let Some(frame) = seek_to {
            self.controller.on_seek(frame);
            ctx.request_repaint();
        }

        self.show_plot_window(ctx);

        if self.controller.state().is_playing() {
            ctx.request_repaint_after(self.tick_interval);
        }
    }
}

/// Opens the video and runs the interactive loop until the user quits.
///
/// Any failure before the loop starts is reported and returns early without
/// creating a window.
pub fn run(video_path: &Path, series: DataSeries, config: AppConfig) -> anyhow::Result<()> {
    if series.is_empty() {
        log::error!("No usable data rows, nothing to plot");
        return Ok(());
    }

    let source = match FfmpegSource::open(video_path, &config.video) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Cannot open video {}: {}", video_path.display(), e);
            return Ok(());
        }
    };

    if let Some(warning) = length_mismatch(series.len(), source.frame_count()) {
        log::warn!("{}", warning);
    }

    let Some(plot) = PlotView::new(&series) else {
        return Ok(());
    };
    let controller = PlaybackController::new(source, series, plot);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_resizable(true)
            .with_title(VIDEO_WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        VIDEO_WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(SlowMoApp::new(controller, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
