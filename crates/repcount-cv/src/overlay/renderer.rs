//! Overlay renderer
//!
//! Composition is pure: it reads a [`FrameReport`] and produces draw
//! operations. Nothing here can reach a session's counter.

use repcount_core::geometry::joint_angle;
use repcount_core::{FrameReport, LandmarkSet, Metric, Status};
use tracing::trace;

use super::{DrawOp, OverlayLayout, Rgb};
use crate::Result;
use crate::traits::Canvas;

#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    layout: OverlayLayout,
}

impl OverlayRenderer {
    pub fn new(layout: OverlayLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    /// Bar colour for a percentage: highlighted only on the exact bounds
    pub fn bar_color(&self, percentage: f32) -> Rgb {
        if percentage == 0.0 || percentage == 100.0 {
            self.layout.bar_bound_color
        } else {
            self.layout.bar_moving_color
        }
    }

    /// Progress bar, percentage, repetition count and status text
    pub fn compose_report(&self, report: &FrameReport) -> Vec<DrawOp> {
        let layout = &self.layout;
        let mut ops = vec![
            DrawOp::FilledRect {
                top_left: (layout.bar_left, layout.bar_top),
                bottom_right: (layout.bar_right, layout.bar_bottom),
                color: self.bar_color(report.percentage),
            },
            DrawOp::FilledRect {
                top_left: (layout.bar_left, report.bar_position as i32),
                bottom_right: (layout.bar_right, layout.bar_bottom),
                color: layout.bar_fill_color,
            },
            DrawOp::text(
                format!("{} %", report.percentage as i32),
                &layout.percentage_text,
            ),
            DrawOp::text(
                format!("Reps: {}", report.repetitions as i32),
                &layout.repetitions_text,
            ),
        ];

        if let Some(status) = report.status {
            let mut style = layout.status_text;
            if status == Status::Jump {
                style.color = layout.jump_color;
            }
            ops.push(DrawOp::text(status.label(), &style));
        }

        ops
    }

    /// Frame rate readout; nothing when the rate is unknown
    pub fn compose_fps(&self, fps: Option<f64>) -> Option<DrawOp> {
        let fps = fps.filter(|fps| fps.is_finite())?;
        Some(DrawOp::text(
            format!("FPS: {}", fps as i64),
            &self.layout.fps_text,
        ))
    }

    /// Limbs, joint markers and angle readouts for angle metrics
    pub fn compose_joints(&self, metric: &Metric, landmarks: &LandmarkSet) -> Vec<DrawOp> {
        let layout = &self.layout;
        let mut ops = Vec::new();

        for joint in metric.joints() {
            let (Some(a), Some(vertex), Some(c)) = (
                landmarks.get(joint.a),
                landmarks.get(joint.vertex),
                landmarks.get(joint.c),
            ) else {
                continue;
            };

            let pixel = |x: f32, y: f32| (x as i32, y as i32);
            let (ax, ay) = pixel(a.x, a.y);
            let (vx, vy) = pixel(vertex.x, vertex.y);
            let (cx, cy) = pixel(c.x, c.y);

            for end in [(ax, ay), (cx, cy)] {
                ops.push(DrawOp::Line {
                    from: end,
                    to: (vx, vy),
                    color: layout.limb_color,
                    thickness: 3,
                });
            }
            for center in [(ax, ay), (vx, vy), (cx, cy)] {
                ops.push(DrawOp::Circle {
                    center,
                    radius: 10,
                    color: layout.joint_color,
                    filled: true,
                });
                ops.push(DrawOp::Circle {
                    center,
                    radius: 15,
                    color: layout.joint_color,
                    filled: false,
                });
            }
            ops.push(DrawOp::Text {
                text: format!("{}", joint_angle(a, vertex, c) as i32),
                origin: (vx - 50, vy + 50),
                size_px: layout.angle_text_px,
                color: layout.joint_color,
            });
        }

        ops
    }

    /// Every landmark as a dot sized and tinted by its visibility
    pub fn compose_landmarks(&self, landmarks: &LandmarkSet) -> Vec<DrawOp> {
        landmarks
            .iter()
            .filter_map(|landmark| {
                let radius = (5.0 * landmark.visibility) as i32;
                if radius == 0 {
                    return None;
                }
                let v = landmark.visibility;
                Some(DrawOp::Circle {
                    center: (landmark.x as i32, landmark.y as i32),
                    radius,
                    color: ((255.0 * v) as u8, (255.0 * (1.0 - v)) as u8, 0),
                    filled: true,
                })
            })
            .collect()
    }

    /// Everything the layout asks for on a frame with a report
    pub fn compose_frame(
        &self,
        report: &FrameReport,
        metric: &Metric,
        landmarks: &LandmarkSet,
    ) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        if self.layout.draw_landmarks {
            ops.extend(self.compose_landmarks(landmarks));
        }
        if self.layout.draw_joints {
            ops.extend(self.compose_joints(metric, landmarks));
        }
        ops.extend(self.compose_report(report));
        ops
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, ops: &[DrawOp]) -> Result<()> {
        trace!(ops = ops.len(), "rendering overlay");
        for op in ops {
            canvas.draw(op)?;
        }
        Ok(())
    }
}
