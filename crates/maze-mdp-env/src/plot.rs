//! Utility-vs-iteration charts

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use maze_mdp_core::{MdpError, Position, Result, Trace};

const CHART_SIZE: (u32, u32) = (1600, 800);

/// Draw one line per state showing its utility after every iteration and
/// save the chart as a PNG.
pub fn plot_utility_vs_iteration(trace: &Trace<Position>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let iterations = trace.values().map(Vec::len).max().unwrap_or(0);
    if iterations == 0 {
        return Err(MdpError::invalid_parameter("trace", "nothing to plot"));
    }

    let (low, mut high) = trace
        .values()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), u| {
            (lo.min(*u), hi.max(*u))
        });
    if high - low < f64::EPSILON {
        high = low + 1.0;
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Estimated utility of each state in each iteration",
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..iterations, low..high)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Number of iterations")
        .y_desc("Utility estimates")
        .draw()
        .map_err(plot_error)?;

    for (n, (state, history)) in trace.iter().enumerate() {
        let color = Palette99::pick(n).to_rgba();
        chart
            .draw_series(LineSeries::new(
                history.iter().copied().enumerate(),
                color,
            ))
            .map_err(plot_error)?
            .label(state.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!(path = %path.display(), states = trace.len(), "utility plot written");
    Ok(())
}

fn plot_error(err: impl Display) -> MdpError {
    MdpError::Io(std::io::Error::other(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_rejected() {
        let trace = Trace::new();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            plot_utility_vs_iteration(&trace, dir.path().join("empty.png")),
            Err(MdpError::InvalidParameter { name: "trace", .. })
        ));
    }
}
