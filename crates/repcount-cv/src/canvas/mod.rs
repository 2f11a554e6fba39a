//! Canvas backends

pub mod image;
#[cfg(feature = "opencv")]
pub mod mat;

pub use self::image::ImageCanvas;
#[cfg(feature = "opencv")]
pub use self::mat::MatCanvas;
