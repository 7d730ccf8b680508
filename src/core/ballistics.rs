use std::ops::RangeInclusive;

use crate::error::SimError;

/// Signed gravitational acceleration, y axis pointing up.
pub const GRAVITY_MPS2: f64 = -9.81;

/// Simulation frames per simulated second. One frame index unit is 1/20 s.
pub const FRAMES_PER_SECOND: f64 = 20.0;

pub const SPEED_RANGE_MPS: RangeInclusive<f64> = 20.0..=35.0;
pub const ANGLE_RANGE_DEG: RangeInclusive<f64> = 0.0..=90.0;

pub const DEFAULT_SPEED_MPS: f64 = 20.0;
pub const DEFAULT_ANGLE_DEG: f64 = 45.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
    pub speed_mps: f64,
    pub angle_deg: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
            angle_deg: DEFAULT_ANGLE_DEG,
        }
    }
}

impl SimulationParameters {
    pub fn new(speed_mps: f64, angle_deg: f64) -> Result<Self, SimError> {
        let params = Self {
            speed_mps,
            angle_deg,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    pub fn velocity_components(&self) -> (f64, f64) {
        // cos(pi/2) is not exactly zero in floating point.
        if self.angle_deg == *ANGLE_RANGE_DEG.end() {
            return (0.0, self.speed_mps);
        }
        let theta = self.angle_rad();
        (self.speed_mps * theta.cos(), self.speed_mps * theta.sin())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        validate_speed(self.speed_mps)?;
        validate_angle(self.angle_deg)
    }
}

pub fn validate_speed(speed_mps: f64) -> Result<(), SimError> {
    if !speed_mps.is_finite() || !SPEED_RANGE_MPS.contains(&speed_mps) {
        return Err(SimError::SpeedOutOfRange {
            value: speed_mps,
            min: *SPEED_RANGE_MPS.start(),
            max: *SPEED_RANGE_MPS.end(),
        });
    }
    Ok(())
}

pub fn validate_angle(angle_deg: f64) -> Result<(), SimError> {
    if !angle_deg.is_finite() || !ANGLE_RANGE_DEG.contains(&angle_deg) {
        return Err(SimError::AngleOutOfRange {
            value: angle_deg,
            min: *ANGLE_RANGE_DEG.start(),
            max: *ANGLE_RANGE_DEG.end(),
        });
    }
    Ok(())
}

/// Constants derived from a set of launch parameters. Recomputed whenever a
/// parameter changes, never integrated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub total_flight_time_s: f64,
    pub max_height_m: f64,
    pub range_m: f64,
}

impl Trajectory {
    pub fn from_parameters(params: SimulationParameters) -> Result<Self, SimError> {
        let (velocity_x, velocity_y) = params.velocity_components();
        let total_flight_time_s = -2.0 * velocity_y / GRAVITY_MPS2;
        let max_height_m = -velocity_y * velocity_y / (2.0 * GRAVITY_MPS2);
        let range_m = velocity_x * total_flight_time_s;

        for (quantity, value) in [
            ("horizontal velocity", velocity_x),
            ("vertical velocity", velocity_y),
            ("total flight time", total_flight_time_s),
            ("max height", max_height_m),
            ("range", range_m),
        ] {
            if !value.is_finite() {
                return Err(SimError::NonFinite { quantity, value });
            }
        }

        Ok(Self {
            velocity_x,
            velocity_y,
            total_flight_time_s,
            max_height_m,
            range_m,
        })
    }

    pub fn position_at(&self, time_s: f64) -> Point {
        Point {
            x: self.velocity_x * time_s,
            y: (self.velocity_y * time_s) + (0.5 * GRAVITY_MPS2 * time_s * time_s),
        }
    }

    /// Like `position_at`, but times past ground contact are clamped onto the
    /// landing point.
    pub fn grounded_position_at(&self, time_s: f64) -> Point {
        let t = time_s.clamp(0.0, self.total_flight_time_s.max(0.0));
        let mut point = self.position_at(t);
        point.y = point.y.max(0.0);
        point
    }
}

/// Elapsed simulated time for a frame index. Frame -1 is the pre-launch frame
/// and maps to t = 0.
pub fn frame_time(frame_index: i64) -> f64 {
    frame_index.max(0) as f64 / FRAMES_PER_SECOND
}

/// Polyline from frame 0 up to and including `frame_index`.
pub fn trace_path(trajectory: &Trajectory, frame_index: i64) -> Vec<Point> {
    if frame_index < 0 {
        return vec![Point::ORIGIN];
    }
    (0..=frame_index)
        .map(|frame| trajectory.grounded_position_at(frame_time(frame)))
        .collect()
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

    #[test]
    fn default_launch_matches_known_values() {
        let trajectory = Trajectory::from_parameters(SimulationParameters::default())
            .expect("defaults are valid");

        assert_close(trajectory.velocity_x, 14.142, 0.001);
        assert_close(trajectory.velocity_y, 14.142, 0.001);
        assert_close(trajectory.total_flight_time_s, 2.883, 0.001);
        assert_close(trajectory.max_height_m, 10.19, 0.01);
        assert_close(trajectory.range_m, 40.77, 0.01);
    }

    #[test]
    fn vertical_launch_has_no_horizontal_motion() {
        let params = SimulationParameters::new(35.0, 90.0).expect("in range");
        let trajectory = Trajectory::from_parameters(params).expect("finite");

        assert_eq!(trajectory.velocity_x, 0.0);
        assert_eq!(trajectory.range_m, 0.0);
        assert_close(trajectory.velocity_y, 35.0, 1e-9);
        assert_close(trajectory.total_flight_time_s, 7.136, 0.001);
        assert_close(trajectory.max_height_m, 62.44, 0.01);
    }

    #[test]
    fn horizontal_launch_lands_immediately() {
        let params = SimulationParameters::new(25.0, 0.0).expect("in range");
        let trajectory = Trajectory::from_parameters(params).expect("finite");

        assert_close(trajectory.total_flight_time_s, 0.0, 1e-12);
        assert_close(trajectory.max_height_m, 0.0, 1e-12);
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(matches!(
            SimulationParameters::new(19.5, 45.0),
            Err(SimError::SpeedOutOfRange { .. })
        ));
        assert!(matches!(
            SimulationParameters::new(20.0, 91.0),
            Err(SimError::AngleOutOfRange { .. })
        ));
        assert!(matches!(
            SimulationParameters::new(f64::NAN, 45.0),
            Err(SimError::SpeedOutOfRange { .. })
        ));
    }

    #[test]
    fn frame_time_treats_prelaunch_frame_as_zero() {
        assert_eq!(frame_time(-1), 0.0);
        assert_eq!(frame_time(0), 0.0);
        assert_eq!(frame_time(20), 1.0);
        assert_eq!(frame_time(7), 7.0 / 20.0);
    }

    #[test]
    fn traced_path_never_goes_below_ground() {
        let trajectory = Trajectory::from_parameters(SimulationParameters::default()).expect("ok");
        let path = trace_path(&trajectory, 80);

        assert_eq!(path.len(), 81);
        assert_eq!(path[0], Point::ORIGIN);
        assert!(path.iter().all(|p| p.y >= 0.0));
        let last = path[path.len() - 1];
        assert_close(last.x, trajectory.range_m, 1e-9);
    }
}
