use log::{debug, info};

use crate::core::stepper::{FrameSnapshot, TickOutcome, TrajectoryStepper};
use crate::core::surface::DrawingSurface;
use crate::core::timer::PeriodicTimer;
use crate::error::SimError;

/// Inputs the control panel can issue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlCommand {
    Play,
    Pause,
    StepForward,
    StepBackward,
    Reset,
    SetSpeed(f64),
    SetAngle(f64),
}

/// Owns the stepper and its periodic tick source. Every firing is a tick
/// followed by a redraw, both finished before the next firing is considered.
pub struct RenderLoop {
    stepper: TrajectoryStepper,
    timer: PeriodicTimer,
}

impl RenderLoop {
    pub fn new(stepper: TrajectoryStepper, tick_hz: f64) -> Result<Self, SimError> {
        Ok(Self {
            stepper,
            timer: PeriodicTimer::new(tick_hz)?,
        })
    }

    pub fn stepper(&self) -> &TrajectoryStepper {
        &self.stepper
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.stepper.snapshot()
    }

    /// True while the periodic tick source is scheduled.
    pub fn is_playing(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn tick_period_s(&self) -> f64 {
        self.timer.period_s()
    }

    /// Feeds elapsed wall time; returns the number of ticks performed.
    pub fn advance<S>(&mut self, dt_s: f64, surface: &mut S) -> Result<u32, SimError>
    where
        S: DrawingSurface + ?Sized,
    {
        let due = self.timer.advance(dt_s);
        let mut fired = 0;
        for _ in 0..due {
            let outcome = self.stepper.tick();
            surface.redraw(&self.stepper.snapshot())?;
            fired += 1;

            if !self.stepper.is_running() {
                self.timer.cancel();
                if outcome == TickOutcome::Stopped {
                    debug!(
                        "render loop stopped at frame {}",
                        self.stepper.state().frame_index
                    );
                }
                break;
            }
        }
        Ok(fired)
    }

    /// Applies a control command. The pending timer is always cancelled before
    /// the stepper is touched; only `Play` schedules it again.
    pub fn dispatch<S>(
        &mut self,
        command: ControlCommand,
        surface: &mut S,
    ) -> Result<(), SimError>
    where
        S: DrawingSurface + ?Sized,
    {
        let was_playing = self.timer.is_armed();
        self.timer.cancel();

        let applied = match command {
            ControlCommand::Play => {
                self.stepper.play();
                self.timer.start();
                Ok(())
            }
            ControlCommand::Pause => {
                self.stepper.pause();
                Ok(())
            }
            ControlCommand::StepForward => {
                self.stepper.step_forward();
                Ok(())
            }
            ControlCommand::StepBackward => {
                self.stepper.step_backward();
                Ok(())
            }
            ControlCommand::Reset => {
                self.stepper.reset();
                Ok(())
            }
            ControlCommand::SetSpeed(speed_mps) => self.stepper.set_speed(speed_mps),
            ControlCommand::SetAngle(angle_deg) => self.stepper.set_angle(angle_deg),
        };

        if let Err(err) = applied {
            if was_playing {
                self.timer.start();
            }
            return Err(err);
        }

        debug!("{command:?} -> frame {}", self.stepper.state().frame_index);
        surface.redraw(&self.stepper.snapshot())
    }

    /// Drives the loop at its nominal rate until it stops on its own or
    /// `max_ticks` have been performed.
    pub fn run_until_stopped<S>(
        &mut self,
        surface: &mut S,
        max_ticks: usize,
    ) -> Result<usize, SimError>
    where
        S: DrawingSurface + ?Sized,
    {
        let period_s = self.timer.period_s();
        let mut ticks = 0usize;
        while self.timer.is_armed() && ticks < max_ticks {
            ticks += self.advance(period_s, surface)? as usize;
        }
        if self.timer.is_armed() {
            info!("tick budget of {max_ticks} exhausted before landing");
        }
        Ok(ticks)
    }
}
