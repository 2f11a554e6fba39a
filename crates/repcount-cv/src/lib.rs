//! Repcount overlay rendering
//!
//! Turns frame reports from `repcount-core` into draw operations and paints
//! them onto frames. The default backend draws on `image` buffers; an OpenCV
//! `Mat` backend is available with the `opencv` feature.

pub mod canvas;
pub mod overlay;
pub mod timing;
pub mod utils;

// Re-export commonly used types
pub use canvas::ImageCanvas;
#[cfg(feature = "opencv")]
pub use canvas::MatCanvas;
pub use overlay::{DrawOp, OverlayLayout, OverlayRenderer, Rgb, TextStyle};
pub use timing::FrameClock;
pub use utils::{ImageUtils, OverlayError};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the rendering system
pub mod traits {
    use super::*;

    /// A surface that can execute overlay draw operations
    pub trait Canvas {
        fn size(&self) -> (u32, u32);
        fn draw(&mut self, op: &DrawOp) -> Result<()>;
    }
}
