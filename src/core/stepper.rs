use log::{debug, trace};

use crate::core::ballistics::{
    FRAMES_PER_SECOND, Point, SimulationParameters, Trajectory, frame_time, trace_path,
    validate_angle, validate_speed,
};
use crate::error::SimError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationState {
    /// Discrete time cursor, one unit per 1/20 s. Starts at -1 before launch.
    pub frame_index: i64,
    pub elapsed_s: f64,
    pub position: Point,
    pub running: bool,
}

impl SimulationState {
    fn initial() -> Self {
        Self {
            frame_index: -1,
            elapsed_s: 0.0,
            position: Point::ORIGIN,
            running: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    Advanced,
    /// This advance would have gone below ground and was clamped to the landing point.
    Grounded,
    /// Ground contact was already reached, so the stepper stopped instead of advancing.
    Stopped,
}

/// Immutable view handed to drawing surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub parameters: SimulationParameters,
    pub trajectory: Trajectory,
    pub state: SimulationState,
}

impl FrameSnapshot {
    pub fn path(&self) -> Vec<Point> {
        trace_path(&self.trajectory, self.state.frame_index)
    }
}

pub struct TrajectoryStepper {
    parameters: SimulationParameters,
    trajectory: Trajectory,
    state: SimulationState,
}

impl TrajectoryStepper {
    pub fn new(parameters: SimulationParameters) -> Result<Self, SimError> {
        parameters.validate()?;
        let trajectory = Trajectory::from_parameters(parameters)?;
        Ok(Self {
            parameters,
            trajectory,
            state: SimulationState::initial(),
        })
    }

    pub fn parameters(&self) -> SimulationParameters {
        self.parameters
    }

    pub fn trajectory(&self) -> Trajectory {
        self.trajectory
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            parameters: self.parameters,
            trajectory: self.trajectory,
            state: self.state,
        }
    }

    pub fn has_landed(&self) -> bool {
        self.state.position.y < 0.0 || self.state.elapsed_s == self.trajectory.total_flight_time_s
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }
        self.advance()
    }

    pub fn step_forward(&mut self) -> TickOutcome {
        self.state.running = true;
        self.advance()
    }

    pub fn step_backward(&mut self) {
        self.state.frame_index = (self.state.frame_index - 2).max(-1);
        self.state.elapsed_s = frame_time(self.state.frame_index);
        self.state.running = true;
        self.state.position = self.trajectory.position_at(self.state.elapsed_s);
        trace!("stepped back to frame {}", self.state.frame_index);
    }

    pub fn reset(&mut self) {
        self.state = SimulationState::initial();
        self.state.position = self.trajectory.position_at(0.0);
    }

    pub fn play(&mut self) {
        self.state.running = true;
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    pub fn set_speed(&mut self, speed_mps: f64) -> Result<(), SimError> {
        validate_speed(speed_mps)?;
        self.apply_parameters(SimulationParameters {
            speed_mps,
            ..self.parameters
        })
    }

    pub fn set_angle(&mut self, angle_deg: f64) -> Result<(), SimError> {
        validate_angle(angle_deg)?;
        self.apply_parameters(SimulationParameters {
            angle_deg,
            ..self.parameters
        })
    }

    fn apply_parameters(&mut self, parameters: SimulationParameters) -> Result<(), SimError> {
        // Computed before assignment so a rejected change leaves the stepper untouched.
        let trajectory = Trajectory::from_parameters(parameters)?;
        self.parameters = parameters;
        self.trajectory = trajectory;
        debug!(
            "parameters now {:.1} m/s at {:.1} deg: flight {:.3} s, apex {:.3} m",
            parameters.speed_mps,
            parameters.angle_deg,
            trajectory.total_flight_time_s,
            trajectory.max_height_m
        );
        self.reset();
        Ok(())
    }

    fn advance(&mut self) -> TickOutcome {
        if self.has_landed() {
            self.state.running = false;
            return TickOutcome::Stopped;
        }

        self.state.frame_index += 1;
        let mut elapsed_s = self.state.frame_index as f64 / FRAMES_PER_SECOND;
        let mut y = self.trajectory.position_at(elapsed_s).y;
        let mut outcome = TickOutcome::Advanced;
        if y < 0.0 {
            elapsed_s = self.trajectory.total_flight_time_s;
            y = 0.0;
            outcome = TickOutcome::Grounded;
            debug!(
                "ground contact at frame {} (t = {:.3} s)",
                self.state.frame_index, elapsed_s
            );
        }

        self.state.elapsed_s = elapsed_s;
        self.state.position = Point {
            x: self.trajectory.velocity_x * elapsed_s,
            y,
        };
        trace!(
            "frame {} t={:.2} pos=({:.2}, {:.2})",
            self.state.frame_index, elapsed_s, self.state.position.x, self.state.position.y
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn default_stepper() -> TrajectoryStepper {
        TrajectoryStepper::new(SimulationParameters::default()).expect("defaults are valid")
    }

    #[test]
    fn starts_before_launch_and_running() {
        let stepper = default_stepper();
        let state = stepper.state();

        assert_eq!(state.frame_index, -1);
        assert_eq!(state.elapsed_s, 0.0);
        assert_eq!(state.position, Point::ORIGIN);
        assert!(state.running);
    }

    #[test]
    fn tick_advances_one_frame() {
        let mut stepper = default_stepper();
        assert_eq!(stepper.tick(), TickOutcome::Advanced);
        assert_eq!(stepper.tick(), TickOutcome::Advanced);

        let state = stepper.state();
        assert_eq!(state.frame_index, 1);
        assert_eq!(state.elapsed_s, 0.05);
        assert_close(state.position.x, 14.142 * 0.05, 0.001);
        assert_close(state.position.y, 14.142 * 0.05 - 0.5 * 9.81 * 0.0025, 0.001);
    }

    #[test]
    fn paused_tick_is_a_no_op() {
        let mut stepper = default_stepper();
        stepper.tick();
        stepper.pause();
        let before = stepper.state();

        assert_eq!(stepper.tick(), TickOutcome::Idle);
        assert_eq!(stepper.state(), before);
    }

    #[test]
    fn play_resumes_from_current_frame() {
        let mut stepper = default_stepper();
        for _ in 0..5 {
            stepper.tick();
        }
        stepper.pause();
        stepper.play();
        stepper.tick();

        assert_eq!(stepper.state().frame_index, 5);
    }

    #[test]
    fn ground_contact_clamps_then_stops() {
        let mut stepper = default_stepper();
        let mut outcomes = Vec::new();
        for _ in 0..200 {
            let outcome = stepper.tick();
            outcomes.push(outcome);
            if outcome == TickOutcome::Grounded {
                break;
            }
        }
        assert_eq!(outcomes.last(), Some(&TickOutcome::Grounded));

        let total = stepper.trajectory().total_flight_time_s;
        let state = stepper.state();
        assert_eq!(state.elapsed_s, total);
        assert_eq!(state.position.y, 0.0);
        assert_close(state.position.x, stepper.trajectory().range_m, 1e-9);

        assert_eq!(stepper.tick(), TickOutcome::Stopped);
        assert!(!stepper.is_running());
        assert_eq!(stepper.tick(), TickOutcome::Idle);
        assert_eq!(stepper.state().elapsed_s, total);
    }

    #[test]
    fn default_flight_lands_on_frame_58() {
        let mut stepper = default_stepper();
        while stepper.tick() != TickOutcome::Grounded {}

        // 2.883 s flight: frame 57 is airborne, frame 58 (2.9 s) would be underground.
        assert_eq!(stepper.state().frame_index, 58);
    }

    #[test]
    fn reset_returns_to_prelaunch_frame() {
        let mut stepper = default_stepper();
        for _ in 0..30 {
            stepper.tick();
        }
        stepper.pause();
        stepper.reset();

        let state = stepper.state();
        assert_eq!(state.frame_index, -1);
        assert_eq!(state.elapsed_s, 0.0);
        assert_eq!(state.position, Point::ORIGIN);
        assert!(state.running);
    }

    #[test]
    fn step_backward_rewinds_two_frames() {
        let mut stepper = default_stepper();
        for _ in 0..10 {
            stepper.tick();
        }
        stepper.pause();
        stepper.step_backward();

        let state = stepper.state();
        assert_eq!(state.frame_index, 7);
        assert_eq!(state.elapsed_s, 7.0 / 20.0);
        assert!(state.running);
        assert_eq!(state.position, stepper.trajectory().position_at(7.0 / 20.0));
    }

    #[test]
    fn step_backward_clamps_at_prelaunch_frame() {
        let mut stepper = default_stepper();
        stepper.tick();
        stepper.step_backward();
        assert_eq!(stepper.state().frame_index, -1);
        stepper.step_backward();
        assert_eq!(stepper.state().frame_index, -1);
        assert_eq!(stepper.state().position, Point::ORIGIN);
    }

    #[test]
    fn step_backward_after_landing_lets_flight_continue() {
        let mut stepper = default_stepper();
        while stepper.tick() != TickOutcome::Grounded {}
        stepper.tick();
        assert!(!stepper.is_running());

        stepper.step_backward();
        assert!(stepper.is_running());
        assert_eq!(stepper.tick(), TickOutcome::Advanced);
        assert_eq!(stepper.state().frame_index, 57);
    }

    #[test]
    fn step_forward_works_while_paused() {
        let mut stepper = default_stepper();
        stepper.pause();
        for expected in 0..5 {
            assert_eq!(stepper.step_forward(), TickOutcome::Advanced);
            assert_eq!(stepper.state().frame_index, expected);
        }
    }

    #[test]
    fn set_speed_recomputes_and_resets() {
        let mut stepper = default_stepper();
        for _ in 0..12 {
            stepper.tick();
        }
        stepper.set_speed(30.0).expect("in range");

        let trajectory = stepper.trajectory();
        assert_close(trajectory.velocity_y, 21.213, 0.001);
        assert_close(trajectory.total_flight_time_s, 4.325, 0.001);
        assert_eq!(stepper.state().frame_index, -1);
        assert_eq!(stepper.parameters().speed_mps, 30.0);
    }

    #[test]
    fn set_angle_uses_vertical_velocity_for_flight_time() {
        let mut stepper = default_stepper();
        stepper.set_angle(30.0).expect("in range");

        // 20 m/s at 30 deg: vY = 10, so flight time is 20 / 9.81.
        assert_close(stepper.trajectory().total_flight_time_s, 2.0387, 0.0001);
        assert_close(stepper.trajectory().max_height_m, 5.0968, 0.0001);
    }

    #[test]
    fn rejected_parameter_change_leaves_state_alone() {
        let mut stepper = default_stepper();
        for _ in 0..4 {
            stepper.tick();
        }
        let before = stepper.snapshot();

        assert!(stepper.set_speed(50.0).is_err());
        assert!(stepper.set_angle(-1.0).is_err());
        assert!(stepper.set_angle(f64::INFINITY).is_err());
        assert_eq!(stepper.snapshot(), before);
    }

    #[test]
    fn zero_degree_launch_stops_without_dividing_by_zero() {
        let params = SimulationParameters::new(20.0, 0.0).expect("in range");
        let mut stepper = TrajectoryStepper::new(params).expect("finite");

        assert_eq!(stepper.tick(), TickOutcome::Stopped);
        assert!(!stepper.is_running());
        let state = stepper.state();
        assert!(state.position.x.is_finite() && state.position.y.is_finite());
    }
}
