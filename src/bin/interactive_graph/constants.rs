use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 720;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 420.0;
pub const RIGHT_MARGIN: f32 = 60.0;
pub const TOP_MARGIN: f32 = 90.0;
pub const BOTTOM_MARGIN: f32 = 110.0;

pub const TITLE_Y: f32 = 40.0;
pub const READOUT_ROW_OFFSET: f32 = 70.0;
pub const READOUT_SPACING: f32 = 18.0;

pub const PANEL_POSITION: (f32, f32) = (18.0, 90.0);
pub const PANEL_SIZE: (f32, f32) = (360.0, 330.0);

pub const MARKER_RADIUS: f32 = 5.0;
pub const AXIS_THICKNESS: f32 = 3.0;
pub const ARROW_HEAD_PX: f32 = 10.0;

pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const PLOT_FILL: Color = Color::new(0.937, 0.937, 0.937, 1.0);
pub const GRID_COLOR: Color = Color::new(0.6, 0.6, 0.6, 1.0);
pub const AXIS_COLOR: Color = Color::new(0.133, 0.133, 0.133, 1.0);
pub const PATH_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);
