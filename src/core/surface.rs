use std::io::Write;

use crate::core::ballistics::GRAVITY_MPS2;
use crate::core::stepper::FrameSnapshot;
use crate::error::SimError;

/// Anything that can present a frame. Surfaces keep no simulation state of
/// their own beyond the snapshot they were last handed.
pub trait DrawingSurface {
    fn redraw(&mut self, frame: &FrameSnapshot) -> Result<(), SimError>;
}

/// Text read-outs shown under the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readouts {
    pub angle: String,
    pub time: String,
    pub total_time: String,
    pub gravity: String,
    pub max_height: String,
    pub position: String,
}

impl Readouts {
    pub fn from_snapshot(frame: &FrameSnapshot) -> Self {
        let state = frame.state;
        Self {
            angle: format!("θ = {:.2}", frame.parameters.angle_rad()),
            time: format!("t = {:.2}s", state.elapsed_s),
            total_time: format!("total_time = {:.2}s", frame.trajectory.total_flight_time_s),
            gravity: format!("g = {GRAVITY_MPS2:.2}m/s^2"),
            max_height: format!("max_height = {:.2}m", frame.trajectory.max_height_m),
            position: format!(
                "position(x, y) = ({:.2}m, {:.2}m)",
                state.position.x, state.position.y
            ),
        }
    }

    pub fn lines(&self) -> [&str; 6] {
        [
            &self.angle,
            &self.time,
            &self.total_time,
            &self.gravity,
            &self.max_height,
            &self.position,
        ]
    }

    pub fn joined(&self, separator: &str) -> String {
        self.lines().join(separator)
    }
}

/// Writes one line of read-outs per redraw.
pub struct ConsoleSurface<W: Write> {
    out: W,
    redraws: usize,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, redraws: 0 }
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DrawingSurface for ConsoleSurface<W> {
    fn redraw(&mut self, frame: &FrameSnapshot) -> Result<(), SimError> {
        let readouts = Readouts::from_snapshot(frame);
        writeln!(
            self.out,
            "[{:>4}] {}",
            frame.state.frame_index,
            readouts.joined(" | ")
        )?;
        self.redraws += 1;
        Ok(())
    }
}
