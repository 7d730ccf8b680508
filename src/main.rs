use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use parabolic_graph::config::SimConfig;
use parabolic_graph::core::plot::{export_svg, timestamped_export_name};
use parabolic_graph::core::render_loop::{ControlCommand, RenderLoop};
use parabolic_graph::core::stepper::{FrameSnapshot, TrajectoryStepper};
use parabolic_graph::core::surface::{ConsoleSurface, DrawingSurface};
use parabolic_graph::{SimError, logging};

/// Plays a projectile flight headlessly and prints the graph read-outs.
#[derive(Debug, Parser)]
#[command(name = "parabolic_graph", version)]
struct Cli {
    /// TOML file with [launch], [timing] and [export] sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial speed in m/s, 20 to 35.
    #[arg(long)]
    speed: Option<f64>,

    /// Launch angle in degrees, 0 to 90.
    #[arg(long)]
    angle: Option<f64>,

    /// Stop after this many ticks even if the projectile is still flying.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: usize,

    /// Only print the flight summary.
    #[arg(long, short)]
    quiet: bool,

    /// Write the final frame as SVG. Without a file name a timestamped one is
    /// created in the configured export directory.
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    export: Option<Option<PathBuf>>,
}

/// Discards frames; used with `--quiet`.
struct NullSurface;

impl DrawingSurface for NullSurface {
    fn redraw(&mut self, _frame: &FrameSnapshot) -> Result<(), SimError> {
        Ok(())
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(speed) = cli.speed {
        config.launch.speed_mps = speed;
    }
    if let Some(angle) = cli.angle {
        config.launch.angle_deg = angle;
    }
    config.validate().context("invalid launch settings")?;
    Ok(config)
}

fn print_summary(out: &mut impl Write, frame: &FrameSnapshot, ticks: usize) -> io::Result<()> {
    let trajectory = frame.trajectory;
    writeln!(out)?;
    writeln!(
        out,
        "Launch: {:.1} m/s at {:.1} deg ({} ticks)",
        frame.parameters.speed_mps, frame.parameters.angle_deg, ticks
    )?;
    writeln!(out, "Time of flight: {:.4} s", trajectory.total_flight_time_s)?;
    writeln!(out, "Max height: {:.4} m", trajectory.max_height_m)?;
    writeln!(out, "Horizontal distance: {:.4} m", frame.state.position.x)?;
    writeln!(
        out,
        "Final frame: {} (t = {:.2} s, {})",
        frame.state.frame_index,
        frame.state.elapsed_s,
        if frame.state.running { "still flying" } else { "landed" }
    )
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::setup("info").context("starting logger")?;

    let config = load_config(&cli)?;
    info!(
        "launching at {:.1} m/s, {:.1} deg",
        config.launch.speed_mps, config.launch.angle_deg
    );

    let stepper = TrajectoryStepper::new(config.parameters())?;
    let mut render_loop = RenderLoop::new(stepper, config.timing.tick_hz)?;

    let stdout = io::stdout();
    let ticks = if cli.quiet {
        let mut surface = NullSurface;
        render_loop.dispatch(ControlCommand::Play, &mut surface)?;
        render_loop.run_until_stopped(&mut surface, cli.max_ticks)?
    } else {
        let mut surface = ConsoleSurface::new(stdout.lock());
        render_loop.dispatch(ControlCommand::Play, &mut surface)?;
        render_loop.run_until_stopped(&mut surface, cli.max_ticks)?
    };

    let frame = render_loop.snapshot();
    print_summary(&mut stdout.lock(), &frame, ticks).context("writing summary")?;

    if let Some(target) = cli.export {
        let path = target.unwrap_or_else(|| {
            config
                .export
                .directory
                .join(timestamped_export_name(&chrono::Local::now()))
        });
        export_svg(&frame, &path, config.export.size())
            .with_context(|| format!("exporting {}", path.display()))?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
