use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::core::DataSeries;

pub const PLOT_TITLE: &str = "Load vs Displacement";

/// Vertical marker position and extent in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Load against displacement with a movable vertical marker.
pub struct PlotView {
    curve: Vec<[f64; 2]>,
    marker: Marker,
    needs_redraw: bool,
}

impl PlotView {
    /// `None` for an empty series, which has nothing to plot.
    pub fn new(series: &DataSeries) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let x = series.displacement_at(0)?;
        let (y_min, y_max) = series.load_range()?;

        let curve = series
            .displacement()
            .iter()
            .zip(series.load())
            .map(|(&d, &l)| [d, l])
            .collect();

        Some(Self {
            curve,
            marker: Marker { x, y_min, y_max },
            needs_redraw: true,
        })
    }

    /// Moves the marker to `displacement`. The vertical span never changes.
    pub fn update(&mut self, displacement: f64) {
        if self.marker.x != displacement {
            log::debug!("Marker {:.4} -> {:.4}", self.marker.x, displacement);
        }
        self.marker.x = displacement;
        self.needs_redraw = true;
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Returns and clears the pending-redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading(PLOT_TITLE);

        let marker = self.marker;
        Plot::new("load_displacement_plot")
            .x_axis_label("Displacement (mm)")
            .y_axis_label("Load (N)")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(self.curve.clone()))
                        .name("Load vs Displacement")
                        .color(egui::Color32::from_rgb(100, 150, 255))
                        .width(1.5),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[marker.x, marker.y_min], [marker.x, marker.y_max]]))
                        .name("Current Displacement")
                        .color(egui::Color32::RED)
                        .style(LineStyle::dashed_loose())
                        .width(1.5),
                );
            });
    }
}
