use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use parabolic_graph::core::ballistics::{ANGLE_RANGE_DEG, SPEED_RANGE_MPS};
use parabolic_graph::core::render_loop::ControlCommand;

use crate::constants::{PANEL_POSITION, PANEL_SIZE};

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) play: bool,
    pub(crate) pause: bool,
    pub(crate) step_forward: bool,
    pub(crate) step_backward: bool,
    pub(crate) reset: bool,
    pub(crate) export: bool,
    pub(crate) speed_mps: Option<f64>,
    pub(crate) angle_deg: Option<f64>,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            play: self.play || other.play,
            pause: self.pause || other.pause,
            step_forward: self.step_forward || other.step_forward,
            step_backward: self.step_backward || other.step_backward,
            reset: self.reset || other.reset,
            export: self.export || other.export,
            speed_mps: other.speed_mps.or(self.speed_mps),
            angle_deg: other.angle_deg.or(self.angle_deg),
        }
    }

    /// Parameter changes come first; they reset the flight, and a transport
    /// command pressed in the same frame then applies to the fresh flight.
    pub(crate) fn commands(&self) -> Vec<ControlCommand> {
        let mut commands = Vec::new();
        if let Some(speed) = self.speed_mps {
            commands.push(ControlCommand::SetSpeed(speed));
        }
        if let Some(angle) = self.angle_deg {
            commands.push(ControlCommand::SetAngle(angle));
        }
        if self.reset {
            commands.push(ControlCommand::Reset);
        }
        if self.step_backward {
            commands.push(ControlCommand::StepBackward);
        }
        if self.step_forward {
            commands.push(ControlCommand::StepForward);
        }
        if self.pause {
            commands.push(ControlCommand::Pause);
        }
        if self.play {
            commands.push(ControlCommand::Play);
        }
        commands
    }
}

/// Slider positions, kept between frames so dragging is smooth while the
/// stepper only sees whole-number values. A change is reported only when the
/// rounded position moves, so a fractional starting value is left alone.
pub(crate) struct SliderValues {
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
    reported_speed_mps: f64,
    reported_angle_deg: f64,
}

impl SliderValues {
    pub(crate) fn new(speed_mps: f64, angle_deg: f64) -> Self {
        let speed_mps = speed_mps as f32;
        let angle_deg = angle_deg as f32;
        Self {
            speed_mps,
            angle_deg,
            reported_speed_mps: f64::from(speed_mps.round()),
            reported_angle_deg: f64::from(angle_deg.round()),
        }
    }

    pub(crate) fn speed_change(&mut self) -> Option<f64> {
        slider_change(self.speed_mps, &mut self.reported_speed_mps)
    }

    pub(crate) fn angle_change(&mut self) -> Option<f64> {
        slider_change(self.angle_deg, &mut self.reported_angle_deg)
    }
}

pub(crate) fn hotkey_actions(playing: bool) -> FrameActions {
    let toggle = is_key_pressed(KeyCode::Space);
    FrameActions {
        play: toggle && !playing,
        pause: toggle && playing,
        step_forward: is_key_pressed(KeyCode::Right),
        step_backward: is_key_pressed(KeyCode::Left),
        reset: is_key_pressed(KeyCode::R),
        export: is_key_pressed(KeyCode::E),
        ..Default::default()
    }
}

fn slider_change(value: f32, reported: &mut f64) -> Option<f64> {
    let rounded = f64::from(value.round());
    if rounded == *reported {
        return None;
    }
    *reported = rounded;
    Some(rounded)
}

pub(crate) fn draw_control_panel(
    sliders: &mut SliderValues,
    applied_speed_mps: f64,
    applied_angle_deg: f64,
    playing: bool,
    status_line: &str,
) -> FrameActions {
    let mut actions = FrameActions::default();
    let speed_range = *SPEED_RANGE_MPS.start() as f32..*SPEED_RANGE_MPS.end() as f32;
    let angle_range = *ANGLE_RANGE_DEG.start() as f32..*ANGLE_RANGE_DEG.end() as f32;

    widgets::Window::new(
        hash!(),
        vec2(PANEL_POSITION.0, PANEL_POSITION.1),
        vec2(PANEL_SIZE.0, PANEL_SIZE.1),
    )
    .label("Launch Controls")
    .ui(&mut *root_ui(), |ui| {
        ui.label(None, "Initial velocity:");
        ui.slider(hash!(), "m/s", speed_range, &mut sliders.speed_mps);
        ui.label(None, &format!("{applied_speed_mps:.1}"));
        ui.separator();
        ui.label(None, "Initial angle:");
        ui.slider(hash!(), "deg", angle_range, &mut sliders.angle_deg);
        ui.label(None, &format!("{applied_angle_deg:.1}"));
        ui.separator();

        if ui.button(None, "<< Backward") {
            actions.step_backward = true;
        }
        ui.same_line(0.0);
        if ui.button(None, "Play") {
            actions.play = true;
        }
        ui.same_line(0.0);
        if ui.button(None, "Pause") {
            actions.pause = true;
        }
        ui.same_line(0.0);
        if ui.button(None, "Forward >>") {
            actions.step_forward = true;
        }
        if ui.button(None, "Reset") {
            actions.reset = true;
        }
        ui.same_line(0.0);
        if ui.button(None, "Export SVG") {
            actions.export = true;
        }
        ui.separator();
        ui.label(
            None,
            if playing {
                "Playback: Playing"
            } else {
                "Playback: Stopped"
            },
        );
        ui.label(None, status_line);
    });

    actions.speed_mps = sliders.speed_change();
    actions.angle_deg = sliders.angle_change();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_changes_precede_transport_commands() {
        let actions = FrameActions {
            play: true,
            angle_deg: Some(30.0),
            ..Default::default()
        };
        assert_eq!(
            actions.commands(),
            vec![ControlCommand::SetAngle(30.0), ControlCommand::Play]
        );
    }

    #[test]
    fn merge_prefers_latest_slider_value() {
        let hotkeys = FrameActions {
            reset: true,
            ..Default::default()
        };
        let panel = FrameActions {
            speed_mps: Some(27.0),
            ..Default::default()
        };
        let merged = hotkeys.merge(panel);
        assert!(merged.reset);
        assert_eq!(merged.speed_mps, Some(27.0));
    }

    #[test]
    fn slider_reports_whole_number_changes_only() {
        let mut sliders = SliderValues::new(20.0, 45.0);
        sliders.speed_mps = 20.3;
        assert_eq!(sliders.speed_change(), None);

        sliders.speed_mps = 21.6;
        assert_eq!(sliders.speed_change(), Some(22.0));
        assert_eq!(sliders.speed_change(), None);
    }

    #[test]
    fn fractional_launch_values_are_not_overridden() {
        let mut sliders = SliderValues::new(22.5, 37.5);
        assert_eq!(sliders.speed_change(), None);
        assert_eq!(sliders.angle_change(), None);

        sliders.angle_deg = 41.2;
        assert_eq!(sliders.angle_change(), Some(41.0));
        assert_eq!(sliders.speed_change(), None);
    }
}
