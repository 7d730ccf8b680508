use macroquad::prelude::*;

use parabolic_graph::SimError;
use parabolic_graph::core::ballistics::Point;
use parabolic_graph::core::stepper::FrameSnapshot;
use parabolic_graph::core::surface::{DrawingSurface, Readouts};
use parabolic_graph::core::window::{AXIS_TICK_STEP_M, axis_ticks};

use crate::constants::{
    ARROW_HEAD_PX, AXIS_COLOR, AXIS_THICKNESS, GRID_COLOR, MARKER_RADIUS, PATH_COLOR, PLOT_FILL,
    READOUT_ROW_OFFSET, READOUT_SPACING, TITLE_Y,
};

/// Screen rectangle of the graph and the world window it shows.
#[derive(Clone, Copy)]
pub(crate) struct PlotArea {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
    pub(crate) world_max_x: f32,
    pub(crate) world_max_y: f32,
}

impl PlotArea {
    pub(crate) fn world_to_screen(&self, world: Point) -> Vec2 {
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        let x = self.left + (world.x as f32 / self.world_max_x.max(1.0)) * plot_w;
        let y = self.bottom - (world.y as f32 / self.world_max_y.max(1.0)) * plot_h;
        vec2(x, y)
    }
}

/// Holds the most recent frame; `present` paints it every display frame,
/// since macroquad redraws from scratch each time.
#[derive(Default)]
pub(crate) struct MacroquadSurface {
    latest: Option<FrameSnapshot>,
}

impl DrawingSurface for MacroquadSurface {
    fn redraw(&mut self, frame: &FrameSnapshot) -> Result<(), SimError> {
        self.latest = Some(*frame);
        Ok(())
    }
}

impl MacroquadSurface {
    pub(crate) fn present(&self, area: PlotArea, font: Option<&Font>) {
        draw_ui_text(
            "Projectile Motion",
            area.left,
            TITLE_Y,
            30,
            AXIS_COLOR,
            font,
        );
        draw_rectangle(
            area.left,
            area.top,
            area.right - area.left,
            area.bottom - area.top,
            PLOT_FILL,
        );
        draw_grid(area, font);
        draw_axes(area, font);

        let Some(frame) = self.latest else {
            return;
        };
        draw_path(&frame.path(), area, 2.0, PATH_COLOR);
        let marker = area.world_to_screen(frame.state.position);
        draw_circle(marker.x, marker.y, MARKER_RADIUS, PATH_COLOR);
        draw_circle_lines(marker.x, marker.y, MARKER_RADIUS, 2.0, BLACK);
        draw_readouts(&Readouts::from_snapshot(&frame), area, font);
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

fn draw_grid(area: PlotArea, font: Option<&Font>) {
    let tick_font_size: u16 = 16;

    for value in axis_ticks(f64::from(area.world_max_x), AXIS_TICK_STEP_M) {
        let x = area.world_to_screen(Point::new(value, 0.0)).x;
        draw_line(x, area.top, x, area.bottom, 1.0, GRID_COLOR);
        let label = format!("{value:.0}");
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            area.bottom + 22.0,
            tick_font_size,
            AXIS_COLOR,
            font,
        );
    }

    for value in axis_ticks(f64::from(area.world_max_y), AXIS_TICK_STEP_M) {
        let y = area.world_to_screen(Point::new(0.0, value)).y;
        draw_line(area.left - 10.0, y, area.right, y, 1.0, GRID_COLOR);
        let label = format!("{value:.0}");
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (area.left - 14.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            AXIS_COLOR,
            font,
        );
    }
}

fn draw_axes(area: PlotArea, font: Option<&Font>) {
    let PlotArea {
        left,
        right,
        top,
        bottom,
        ..
    } = area;

    draw_line(left - 10.0, bottom, right, bottom, AXIS_THICKNESS, AXIS_COLOR);
    draw_line(right - ARROW_HEAD_PX, bottom - 6.0, right, bottom, AXIS_THICKNESS, AXIS_COLOR);
    draw_line(right - ARROW_HEAD_PX, bottom + 6.0, right, bottom, AXIS_THICKNESS, AXIS_COLOR);
    draw_ui_text("x (m)", right + 8.0, bottom + 5.0, 18, AXIS_COLOR, font);

    draw_line(left, top - 20.0, left, bottom, AXIS_THICKNESS, AXIS_COLOR);
    draw_line(left - 6.0, top - 20.0 + ARROW_HEAD_PX, left, top - 20.0, AXIS_THICKNESS, AXIS_COLOR);
    draw_line(left + 6.0, top - 20.0 + ARROW_HEAD_PX, left, top - 20.0, AXIS_THICKNESS, AXIS_COLOR);
    draw_ui_text("y (m)", left - 10.0, top - 30.0, 18, AXIS_COLOR, font);
}

fn draw_path(points: &[Point], area: PlotArea, thickness: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    let mut prev = area.world_to_screen(points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = area.world_to_screen(point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

fn draw_readouts(readouts: &Readouts, area: PlotArea, font: Option<&Font>) {
    let y = area.bottom + READOUT_ROW_OFFSET;
    let mut x = area.left;
    for line in readouts.lines() {
        draw_ui_text(line, x, y, 20, AXIS_COLOR, font);
        x += measure_text(line, font, 20, 1.0).width + READOUT_SPACING;
    }
}
