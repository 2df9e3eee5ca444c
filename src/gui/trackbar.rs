use eframe::egui;

/// Frame slider painted like a timeline.
///
/// `show` reports a target only when the user clicks or drags to a frame
/// other than the one currently shown, so programmatic position changes
/// never come back out as seeks.
pub struct TrackbarWidget {
    pub is_scrubbing: bool,
    last_requested: Option<usize>,
}

impl TrackbarWidget {
    pub fn new() -> Self {
        Self {
            is_scrubbing: false,
            last_requested: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, position: usize, frame_count: usize) -> Option<usize> {
        let max_frame = frame_count.saturating_sub(1);

        let available_width = ui.available_width() - 20.0;
        let trackbar_height = 48.0;

        let (rect, response) = ui.allocate_exact_size(
            egui::Vec2::new(available_width.max(50.0), trackbar_height),
            egui::Sense::click_and_drag(),
        );

        let track_rect = egui::Rect::from_min_size(
            rect.min + egui::Vec2::new(10.0, 18.0),
            egui::Vec2::new(rect.width() - 20.0, 12.0),
        );

        let mut requested = None;
        if response.clicked() || response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.is_scrubbing = response.dragged();
                let target = Self::frame_at(pointer.x, track_rect, max_frame);
                if target != position && self.last_requested != Some(target) {
                    requested = Some(target);
                }
                self.last_requested = Some(target);
            }
        }

        if response.drag_stopped() || !(response.dragged() || response.clicked()) {
            self.is_scrubbing = false;
            self.last_requested = None;
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            painter.rect_filled(rect, egui::Rounding::same(4.0), ui.visuals().extreme_bg_color);

            painter.rect_stroke(
                track_rect,
                egui::Rounding::same(2.0),
                egui::Stroke::new(1.0, ui.visuals().text_color()),
            );

            // Frame ticks
            if max_frame > 0 {
                let frames_per_pixel = max_frame as f64 / track_rect.width() as f64;
                let interval = Self::calculate_marker_interval(frames_per_pixel);
                let mut frame = 0;
                while frame <= max_frame {
                    let x = Self::x_for_frame(frame, track_rect, max_frame);
                    painter.line_segment(
                        [egui::Pos2::new(x, track_rect.min.y), egui::Pos2::new(x, track_rect.max.y)],
                        egui::Stroke::new(0.5, ui.visuals().weak_text_color()),
                    );
                    painter.text(
                        egui::Pos2::new(x, track_rect.min.y - 3.0),
                        egui::Align2::CENTER_BOTTOM,
                        frame.to_string(),
                        egui::FontId::monospace(9.0),
                        ui.visuals().weak_text_color(),
                    );
                    frame += interval;
                }
            }

            let shown = position.min(max_frame);
            let current_x = Self::x_for_frame(shown, track_rect, max_frame);

            let filled = egui::Rect::from_min_max(track_rect.min, egui::Pos2::new(current_x, track_rect.max.y));
            painter.rect_filled(
                filled,
                egui::Rounding::same(2.0),
                ui.visuals().selection.bg_fill.gamma_multiply(0.5),
            );

            // Playhead
            let handle = egui::Rect::from_center_size(
                egui::Pos2::new(current_x, track_rect.center().y),
                egui::Vec2::new(8.0, track_rect.height() + 10.0),
            );
            let handle_color = if self.is_scrubbing {
                egui::Color32::from_rgb(255, 120, 120)
            } else {
                egui::Color32::RED
            };
            painter.rect_filled(handle, egui::Rounding::same(3.0), handle_color);

            painter.text(
                rect.max - egui::Vec2::new(10.0, 2.0),
                egui::Align2::RIGHT_BOTTOM,
                format!("Frame {} / {}", shown, max_frame),
                egui::FontId::monospace(11.0),
                ui.visuals().text_color(),
            );
        }

        requested
    }

    /// Nearest frame under horizontal pointer position `x`.
    pub fn frame_at(x: f32, track_rect: egui::Rect, max_frame: usize) -> usize {
        if max_frame == 0 || track_rect.width() <= 0.0 {
            return 0;
        }
        let relative = ((x - track_rect.min.x) / track_rect.width()).clamp(0.0, 1.0) as f64;
        ((relative * max_frame as f64).round() as usize).min(max_frame)
    }

    fn x_for_frame(frame: usize, track_rect: egui::Rect, max_frame: usize) -> f32 {
        if max_frame == 0 {
            return track_rect.min.x;
        }
        track_rect.min.x + (frame as f32 / max_frame as f32) * track_rect.width()
    }

    /// Tick spacing in frames, rounded to a readable step.
    pub fn calculate_marker_interval(frames_per_pixel: f64) -> usize {
        let target_pixel_spacing = 70.0;
        let base_interval = frames_per_pixel * target_pixel_spacing;

        for step in [1, 2, 5, 10, 25, 50, 100, 250, 500, 1000, 2500, 5000] {
            if base_interval <= step as f64 {
                return step;
            }
        }
        10000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(10.0, 0.0), egui::Vec2::new(100.0, 12.0))
    }

    #[test]
    fn test_frame_at_maps_track_to_range() {
        assert_eq!(TrackbarWidget::frame_at(10.0, track(), 10), 0);
        assert_eq!(TrackbarWidget::frame_at(60.0, track(), 10), 5);
        assert_eq!(TrackbarWidget::frame_at(110.0, track(), 10), 10);
    }

    #[test]
    fn test_frame_at_clamps_outside_track() {
        assert_eq!(TrackbarWidget::frame_at(-50.0, track(), 10), 0);
        assert_eq!(TrackbarWidget::frame_at(500.0, track(), 10), 10);
    }

    #[test]
    fn test_single_frame_video() {
        assert_eq!(TrackbarWidget::frame_at(80.0, track(), 0), 0);
    }

    #[test]
    fn test_marker_interval_steps() {
        assert_eq!(TrackbarWidget::calculate_marker_interval(0.01), 1);
        assert_eq!(TrackbarWidget::calculate_marker_interval(0.1), 10);
        assert_eq!(TrackbarWidget::calculate_marker_interval(3.0), 250);
        assert_eq!(TrackbarWidget::calculate_marker_interval(1000.0), 10000);
    }
}
