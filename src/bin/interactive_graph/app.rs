use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use macroquad::prelude::*;

use parabolic_graph::config::SimConfig;
use parabolic_graph::core::plot::{export_svg, timestamped_export_name};
use parabolic_graph::core::render_loop::{ControlCommand, RenderLoop};
use parabolic_graph::core::stepper::TrajectoryStepper;
use parabolic_graph::core::surface::DrawingSurface;
use parabolic_graph::core::window::graph_window;
use parabolic_graph::logging;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MSAA_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{SliderValues, draw_control_panel, hotkey_actions};
use crate::render::{MacroquadSurface, PlotArea};

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Parabolic Graph".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn load_config() -> Result<SimConfig> {
    match env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            SimConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(SimConfig::default()),
    }
}

pub(crate) async fn run() -> Result<()> {
    let _logger = logging::setup("info").context("starting logger")?;
    let config = load_config()?;

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let stepper = TrajectoryStepper::new(config.parameters())?;
    let mut render_loop = RenderLoop::new(stepper, config.timing.tick_hz)?;
    let mut surface = MacroquadSurface::default();
    surface.redraw(&render_loop.snapshot())?;
    if config.timing.autoplay {
        render_loop.dispatch(ControlCommand::Play, &mut surface)?;
    }

    let mut sliders = SliderValues::new(config.launch.speed_mps, config.launch.angle_deg);
    let mut status_line = String::from("Ready");
    let (world_max_x, world_max_y) = graph_window();
    log::info!("interactive graph started");

    loop {
        let frame_dt = get_frame_time();
        let area = PlotArea {
            left: LEFT_MARGIN,
            right: screen_width() - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_height() - BOTTOM_MARGIN,
            world_max_x: world_max_x as f32,
            world_max_y: world_max_y as f32,
        };

        let params = render_loop.stepper().parameters();
        let playing = render_loop.is_playing();
        let actions = hotkey_actions(playing).merge(draw_control_panel(
            &mut sliders,
            params.speed_mps,
            params.angle_deg,
            playing,
            &status_line,
        ));

        for command in actions.commands() {
            if let Err(err) = render_loop.dispatch(command, &mut surface) {
                log::warn!("{command:?} rejected: {err}");
                status_line = err.to_string();
            }
        }

        if actions.export {
            let path = config
                .export
                .directory
                .join(timestamped_export_name(&chrono::Local::now()));
            status_line = match export_svg(&render_loop.snapshot(), &path, config.export.size()) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(err) => {
                    log::error!("export failed: {err}");
                    format!("Export failed: {err}")
                }
            };
        }

        render_loop.advance(f64::from(frame_dt), &mut surface)?;

        clear_background(BACKGROUND);
        surface.present(area, ui_font.as_ref());

        next_frame().await;
    }
}
