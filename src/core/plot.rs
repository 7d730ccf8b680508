use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::stepper::FrameSnapshot;
use crate::core::surface::{DrawingSurface, Readouts};
use crate::core::window::graph_window;
use crate::error::SimError;

pub const DEFAULT_EXPORT_SIZE: (u32, u32) = (1280, 720);

const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);
const PATH_COLOR: RGBColor = RGBColor(0, 0, 255);
const MARKER_RADIUS: i32 = 4;

fn draw_frame(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    frame: &FrameSnapshot,
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    root.fill(&WHITE)?;

    let (max_x, max_y) = graph_window();
    let caption = Readouts::from_snapshot(frame).joined("   ");
    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 16))
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(44)
        .build_cartesian_2d(0f64..max_x, 0f64..max_y)?;

    chart
        .configure_mesh()
        .light_line_style(GRID_COLOR.mix(0.4))
        .x_desc("x (m)")
        .y_desc("y (m)")
        .draw()?;

    let path = frame.path();
    chart.draw_series(LineSeries::new(
        path.iter().map(|p| (p.x, p.y)),
        PATH_COLOR.stroke_width(2),
    ))?;

    let marker = frame.state.position;
    chart.draw_series(std::iter::once(Circle::new(
        (marker.x, marker.y),
        MARKER_RADIUS,
        PATH_COLOR.filled(),
    )))?;

    Ok(())
}

pub fn render_svg(frame: &FrameSnapshot, size: (u32, u32)) -> Result<String, SimError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_frame(&root, frame).map_err(|err| SimError::Plot(err.to_string()))?;
        root.present().map_err(|err| SimError::Plot(err.to_string()))?;
    }
    Ok(svg)
}

pub fn export_svg(frame: &FrameSnapshot, path: &Path, size: (u32, u32)) -> Result<(), SimError> {
    let svg = render_svg(frame, size)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    info!("exported frame {} to {}", frame.state.frame_index, path.display());
    Ok(())
}

pub fn timestamped_export_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("trajectory-{}.svg", now.format("%Y%m%d-%H%M%S"))
}

/// Keeps the SVG document for the most recent redraw.
pub struct SvgSurface {
    size: (u32, u32),
    latest: Option<String>,
}

impl SvgSurface {
    pub fn new(size: (u32, u32)) -> Self {
        Self { size, latest: None }
    }

    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }
}

impl DrawingSurface for SvgSurface {
    fn redraw(&mut self, frame: &FrameSnapshot) -> Result<(), SimError> {
        self.latest = Some(render_svg(frame, self.size)?);
        Ok(())
    }
}
