use crate::core::DataSeries;
use crate::input::KeyCommand;
use crate::playback::{LoopControl, PlaybackState};
use crate::plot::PlotView;
use crate::video::{Frame, FrameSource};

/// The most recently decoded frame and where it came from.
pub struct DisplayedFrame {
    pub index: usize,
    pub frame: Frame,
}

/// Keeps video frame, trackbar and plot marker on one shared frame index.
///
/// The event loop adapter calls [`on_tick`](Self::on_tick) once per
/// iteration and [`on_seek`](Self::on_seek) whenever the user drags the
/// trackbar. Setting the trackbar from `on_tick` never goes through
/// `on_seek`.
pub struct PlaybackController<S: FrameSource> {
    source: S,
    series: DataSeries,
    plot: PlotView,
    state: PlaybackState,
    current_frame: usize,
    trackbar_position: usize,
    displayed: Option<DisplayedFrame>,
    display_generation: u64,
}

impl<S: FrameSource> PlaybackController<S> {
    pub fn new(source: S, series: DataSeries, plot: PlotView) -> Self {
        let mut controller = Self {
            source,
            series,
            plot,
            state: PlaybackState::Paused,
            current_frame: 0,
            trackbar_position: 0,
            displayed: None,
            display_generation: 0,
        };

        if controller.source.is_open() && controller.source.frame_count() > 0 {
            controller.present(0);
        }
        controller
    }

    pub fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
        log::info!("{}", self.state.display_text());
    }

    /// Releases the video. The controller stays usable but inert.
    pub fn quit(&mut self) {
        self.state = PlaybackState::Paused;
        self.source.release();
    }

    pub fn handle_key(&mut self, command: KeyCommand) -> LoopControl {
        match command {
            KeyCommand::TogglePause => {
                self.toggle_pause();
                LoopControl::Continue
            }
            KeyCommand::Quit => {
                log::info!("Quit requested");
                self.quit();
                LoopControl::Exit
            }
        }
    }

    /// Autonomous advance. Returns whether the frame index moved.
    pub fn on_tick(&mut self) -> bool {
        if !self.state.is_playing() || !self.source.is_open() {
            return false;
        }
        if self.current_frame >= self.last_frame() {
            return false;
        }

        let next = self.current_frame + 1;
        self.current_frame = next;
        self.present(next);
        self.trackbar_position = next;
        true
    }

    /// Trackbar drag. Works the same whether playing or paused.
    pub fn on_seek(&mut self, frame: usize) {
        if !self.source.is_open() {
            log::warn!("Video capture is not open, ignoring seek to frame {}", frame);
            return;
        }

        let target = frame.min(self.last_frame());
        log::debug!("Seek to frame {}", target);
        self.current_frame = target;
        self.trackbar_position = target;
        self.present(target);
    }

    /// Decodes and shows `index`, then moves the marker if data exists for it.
    fn present(&mut self, index: usize) {
        match self.source.read_frame(index) {
            Ok(frame) => {
                self.displayed = Some(DisplayedFrame { index, frame });
                self.display_generation += 1;
            }
            Err(e) => log::warn!("Keeping previous frame on screen: {}", e),
        }

        if let Some(displacement) = self.series.displacement_at(index) {
            self.plot.update(displacement);
        }
    }

    fn last_frame(&self) -> usize {
        self.source.frame_count().saturating_sub(1)
    }

    // =============================================================================
    // STATE QUERIES
    // =============================================================================

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn trackbar_position(&self) -> usize {
        self.trackbar_position
    }

    pub fn frame_count(&self) -> usize {
        self.source.frame_count()
    }

    pub fn displayed(&self) -> Option<&DisplayedFrame> {
        self.displayed.as_ref()
    }

    /// Bumped every time a new frame lands on screen.
    pub fn display_generation(&self) -> u64 {
        self.display_generation
    }

    pub fn current_sample(&self) -> Option<(f64, f64)> {
        let i = self.current_frame;
        Some((self.series.displacement_at(i)?, self.series.load_at(i)?))
    }

    pub fn plot(&self) -> &PlotView {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut PlotView {
        &mut self.plot
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Describes how data rows and video frames fail to line up, if they do.
///
/// Frames past the last data row leave the marker where it was; data rows
/// past the last frame are never shown.
pub fn length_mismatch(data_rows: usize, frame_count: usize) -> Option<String> {
    if data_rows < frame_count {
        Some(format!(
            "Data has {} rows but video has {} frames; the marker stays put for frames {}..{}",
            data_rows,
            frame_count,
            data_rows,
            frame_count - 1
        ))
    } else if data_rows > frame_count {
        Some(format!(
            "Data has {} rows but video has only {} frames; the last {} rows are never shown",
            data_rows,
            frame_count,
            data_rows - frame_count
        ))
    } else {
        None
    }
}
