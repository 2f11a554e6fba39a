//! `image::RgbImage` backend drawn with imageproc

use ab_glyph::{FontVec, PxScale};
use image::{Rgb as Pixel, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
    draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;
use tracing::debug;

use crate::Result;
use crate::overlay::{DrawOp, Rgb};
use crate::traits::Canvas;

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

/// Draws onto a borrowed RGB frame. Text needs a font; without one text
/// operations are skipped.
pub struct ImageCanvas<'a> {
    image: &'a mut RgbImage,
    font: Option<&'a FontVec>,
}

impl<'a> ImageCanvas<'a> {
    pub fn new(image: &'a mut RgbImage) -> Self {
        Self { image, font: None }
    }

    pub fn with_font(mut self, font: Option<&'a FontVec>) -> Self {
        self.font = font;
        self
    }

    fn thick_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb, thickness: u32) {
        let (x0, y0) = (from.0 as f32, from.1 as f32);
        let (x1, y1) = (to.0 as f32, to.1 as f32);
        let length = (x1 - x0).hypot(y1 - y0);
        if length == 0.0 {
            draw_filled_circle_mut(&mut *self.image, from, (thickness / 2) as i32, pixel(color));
            return;
        }
        // unit normal to the segment
        let (nx, ny) = (-(y1 - y0) / length, (x1 - x0) / length);
        let thickness = thickness.max(1);
        for step in 0..thickness {
            let offset = step as f32 - (thickness - 1) as f32 / 2.0;
            draw_line_segment_mut(
                &mut *self.image,
                (x0 + nx * offset, y0 + ny * offset),
                (x1 + nx * offset, y1 + ny * offset),
                pixel(color),
            );
        }
    }
}

impl Canvas for ImageCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn draw(&mut self, op: &DrawOp) -> Result<()> {
        match op {
            DrawOp::FilledRect {
                top_left,
                bottom_right,
                color,
            } => {
                let (x0, x1) = (top_left.0.min(bottom_right.0), top_left.0.max(bottom_right.0));
                let (y0, y1) = (top_left.1.min(bottom_right.1), top_left.1.max(bottom_right.1));
                let (width, height) = ((x1 - x0) as u32, (y1 - y0) as u32);
                if width > 0 && height > 0 {
                    draw_filled_rect_mut(
                        &mut *self.image,
                        Rect::at(x0, y0).of_size(width, height),
                        pixel(*color),
                    );
                }
            }
            DrawOp::Line {
                from,
                to,
                color,
                thickness,
            } => self.thick_line(*from, *to, *color, *thickness),
            DrawOp::Circle {
                center,
                radius,
                color,
                filled,
            } => {
                if *filled {
                    draw_filled_circle_mut(&mut *self.image, *center, *radius, pixel(*color));
                } else {
                    draw_hollow_circle_mut(&mut *self.image, *center, *radius, pixel(*color));
                }
            }
            DrawOp::Text {
                text,
                origin,
                size_px,
                color,
            } => match self.font {
                Some(font) => {
                    let top = origin.1 - *size_px as i32;
                    draw_text_mut(
                        &mut *self.image,
                        pixel(*color),
                        origin.0,
                        top,
                        PxScale::from(*size_px),
                        font,
                        text,
                    );
                }
                None => debug!(text = %text, "no font loaded, text skipped"),
            },
        }
        Ok(())
    }
}
