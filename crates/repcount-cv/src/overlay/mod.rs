//! Overlay composition

pub mod layout;
pub mod renderer;

pub use layout::{OverlayLayout, TextStyle};
pub use renderer::OverlayRenderer;

use serde::{Deserialize, Serialize};

/// RGB colour
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const GREEN: Rgb = (0, 255, 0);
pub const RED: Rgb = (255, 0, 0);
pub const CORAL: Rgb = (255, 78, 80);

/// A single backend-independent drawing primitive.
///
/// Text origins are the bottom-left corner of the text, as in OpenCV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    FilledRect {
        top_left: (i32, i32),
        bottom_right: (i32, i32),
        color: Rgb,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgb,
        thickness: u32,
    },
    Circle {
        center: (i32, i32),
        radius: i32,
        color: Rgb,
        filled: bool,
    },
    Text {
        text: String,
        origin: (i32, i32),
        size_px: f32,
        color: Rgb,
    },
}

impl DrawOp {
    pub fn text(text: impl Into<String>, style: &TextStyle) -> Self {
        DrawOp::Text {
            text: text.into(),
            origin: style.origin,
            size_px: style.size_px,
            color: style.color,
        }
    }
}
