//! OpenCV `Mat` backend

use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FILLED, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};

use crate::Result;
use crate::overlay::{DrawOp, Rgb};
use crate::traits::Canvas;

/// Pixel height of FONT_HERSHEY_SIMPLEX at scale 1.0
const HERSHEY_SIMPLEX_PX: f64 = 22.0;

/// OpenCV colour scalar (BGR order)
fn bgr(color: Rgb) -> Scalar {
    Scalar::new(color.2 as f64, color.1 as f64, color.0 as f64, 255.0)
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}

/// Draws onto a borrowed BGR `Mat`
pub struct MatCanvas<'a> {
    mat: &'a mut Mat,
}

impl<'a> MatCanvas<'a> {
    pub fn new(mat: &'a mut Mat) -> Self {
        Self { mat }
    }
}

impl Canvas for MatCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.mat.cols().max(0) as u32, self.mat.rows().max(0) as u32)
    }

    fn draw(&mut self, op: &DrawOp) -> Result<()> {
        match op {
            DrawOp::FilledRect {
                top_left,
                bottom_right,
                color,
            } => imgproc::rectangle_points(
                &mut *self.mat,
                point(*top_left),
                point(*bottom_right),
                bgr(*color),
                FILLED,
                LINE_8,
                0,
            )?,
            DrawOp::Line {
                from,
                to,
                color,
                thickness,
            } => imgproc::line(
                &mut *self.mat,
                point(*from),
                point(*to),
                bgr(*color),
                *thickness as i32,
                LINE_8,
                0,
            )?,
            DrawOp::Circle {
                center,
                radius,
                color,
                filled,
            } => imgproc::circle(
                &mut *self.mat,
                point(*center),
                *radius,
                bgr(*color),
                if *filled { FILLED } else { 2 },
                LINE_8,
                0,
            )?,
            DrawOp::Text {
                text,
                origin,
                size_px,
                color,
            } => imgproc::put_text(
                &mut *self.mat,
                text,
                point(*origin),
                FONT_HERSHEY_SIMPLEX,
                *size_px as f64 / HERSHEY_SIMPLEX_PX,
                bgr(*color),
                2,
                LINE_AA,
                false,
            )?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{CORAL, WHITE};
    use opencv::core::{CV_8UC3, Vec3b};

    #[test]
    fn test_draws_in_bgr_order() -> Result<()> {
        let mut mat = Mat::new_rows_cols_with_default(40, 60, CV_8UC3, Scalar::all(0.0))?;
        let mut canvas = MatCanvas::new(&mut mat);
        assert_eq!(canvas.size(), (60, 40));
        canvas.draw(&DrawOp::FilledRect {
            top_left: (10, 10),
            bottom_right: (30, 30),
            color: CORAL,
        })?;
        canvas.draw(&DrawOp::Text {
            text: "5 %".to_string(),
            origin: (0, 39),
            size_px: 11.0,
            color: WHITE,
        })?;
        let pixel = *mat.at_2d::<Vec3b>(20, 20)?;
        assert_eq!(pixel, Vec3b::from([80, 78, 255]));
        Ok(())
    }
}
