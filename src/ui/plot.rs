use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::outputs::ChartOutput;

// ---------------------------------------------------------------------------
// Bill length vs. depth scatter
// ---------------------------------------------------------------------------

/// Render the scatter plot. An empty chart output draws empty axes.
pub fn scatter_plot(ui: &mut Ui, chart: &ChartOutput, colors: &SpeciesColors) {
    if chart.point_count() == 0 {
        ui.weak("No penguins match the current filters");
    }

    Plot::new("bill_scatter")
        .legend(Legend::default())
        .x_axis_label("Bill length (mm)")
        .y_axis_label("Bill depth (mm)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(series.species.label())
                    .color(colors.color_for(series.species))
                    .radius(3.0);
                plot_ui.points(points);
            }
        });
}
