use crate::core::ballistics::{GRAVITY_MPS2, SPEED_RANGE_MPS};

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio
pub const AXIS_TICK_STEP_M: f64 = 10.0;

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

pub fn fixed_ratio_axis_window(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

/// Window covering every trajectory reachable from the speed range, so the
/// graph scale does not change while the sliders move.
pub fn graph_window() -> (f64, f64) {
    let top_speed = *SPEED_RANGE_MPS.end();
    let g = GRAVITY_MPS2.abs();
    let farthest_range = top_speed * top_speed / g; // 45 deg
    let highest_apex = top_speed * top_speed / (2.0 * g); // 90 deg
    fixed_ratio_axis_window(farthest_range, highest_apex)
}

/// Tick values from 0 up to `max` (inclusive when it lands on a step).
pub fn axis_ticks(max: f64, step: f64) -> Vec<f64> {
    if !(max.is_finite() && step.is_finite() && step > 0.0) || max < 0.0 {
        return Vec::new();
    }
    let count = (max / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_requested_ratio() {
        let (x, y) = fixed_ratio_axis_window(100.0, 80.0);
        assert!((x / y - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
        assert!(y >= 88.0);
    }

    #[test]
    fn graph_window_contains_every_reachable_flight() {
        let (x, y) = graph_window();
        assert!(x > 35.0 * 35.0 / 9.81);
        assert!(y > 35.0 * 35.0 / (2.0 * 9.81));
    }

    #[test]
    fn ticks_step_every_ten_meters() {
        assert_eq!(axis_ticks(35.0, 10.0), vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(axis_ticks(20.0, 10.0), vec![0.0, 10.0, 20.0]);
        assert!(axis_ticks(10.0, 0.0).is_empty());
    }
}
