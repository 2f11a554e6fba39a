//! Overlay layout configuration

use serde::{Deserialize, Serialize};

use super::{CORAL, GREEN, RED, Rgb, WHITE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub origin: (i32, i32),
    pub size_px: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(origin: (i32, i32), size_px: f32, color: Rgb) -> Self {
        Self {
            origin,
            size_px,
            color,
        }
    }
}

/// Positions, sizes and colours of everything the overlay draws.
/// Defaults target a 1280x720 frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    pub bar_left: i32,
    pub bar_right: i32,
    pub bar_top: i32,
    pub bar_bottom: i32,
    /// Fill below the progress edge
    pub bar_fill_color: Rgb,
    /// Bar colour when the metric sits on a calibration bound
    pub bar_bound_color: Rgb,
    /// Bar colour anywhere between the bounds
    pub bar_moving_color: Rgb,
    pub percentage_text: TextStyle,
    pub repetitions_text: TextStyle,
    pub fps_text: TextStyle,
    /// Style of "Keep Going!"; "Jump!" reuses it in `jump_color`
    pub status_text: TextStyle,
    pub jump_color: Rgb,
    pub joint_color: Rgb,
    pub limb_color: Rgb,
    pub angle_text_px: f32,
    /// Draw the measured joints and their angles
    pub draw_joints: bool,
    /// Draw every landmark coloured by visibility
    pub draw_landmarks: bool,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            bar_left: 1100,
            bar_right: 1175,
            bar_top: 100,
            bar_bottom: 650,
            bar_fill_color: WHITE,
            bar_bound_color: GREEN,
            bar_moving_color: CORAL,
            percentage_text: TextStyle::new((1080, 75), 33.0, WHITE),
            repetitions_text: TextStyle::new((50, 700), 44.0, WHITE),
            fps_text: TextStyle::new((50, 100), 33.0, RED),
            status_text: TextStyle::new((400, 50), 33.0, GREEN),
            jump_color: RED,
            joint_color: RED,
            limb_color: WHITE,
            angle_text_px: 24.0,
            draw_joints: false,
            draw_landmarks: false,
        }
    }
}
