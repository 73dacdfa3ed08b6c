//! Burn the shot geometry back onto a copy of the photo.
//!
//! Draw order is cue outline, target outline, connecting segment, then the
//! angle label, so the label is never covered by geometry. All primitives
//! clip at the canvas border.

mod font;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::angle::Angle;
use crate::geometry::Circle;

/// Largest honored stroke width, in pixels.
const MAX_STROKE: u32 = 64;
/// Largest honored label scale.
const MAX_LABEL_SCALE: u32 = 64;

/// Colors, stroke widths and label placement for annotations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Cue ball outline (RGB).
    pub cue_color: [u8; 3],
    /// Target ball outline (RGB).
    pub target_color: [u8; 3],
    /// Segment between the two centers (RGB).
    pub line_color: [u8; 3],
    /// Angle label (RGB).
    pub label_color: [u8; 3],
    /// Outline stroke width in pixels, capped at 64.
    pub outline_thickness: u32,
    /// Segment stroke width in pixels, capped at 64.
    pub line_thickness: u32,
    /// Bottom-left corner of the label, in pixels.
    pub label_origin: [i32; 2],
    /// Size of one font pixel, in image pixels (1 to 64).
    pub label_scale: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            cue_color: [0, 255, 0],
            target_color: [255, 0, 0],
            line_color: [0, 0, 255],
            label_color: [255, 255, 255],
            outline_thickness: 3,
            line_thickness: 2,
            label_origin: [50, 50],
            label_scale: 3,
        }
    }
}

/// Text burned into the annotated image for `angle`.
pub fn label_text(angle: Angle) -> String {
    format!("Shoot Angle: {:.1} deg", angle)
}

/// Offsets of the strokes making up a line of `thickness` pixels, centered
/// on zero (extra pixel goes to the positive side).
fn stroke_offsets(thickness: u32) -> impl Iterator<Item = i32> {
    let t = thickness.clamp(1, MAX_STROKE) as i32;
    let start = -(t - 1) / 2;
    start..start + t
}

fn draw_thick_circle(canvas: &mut RgbImage, circle: &Circle, thickness: u32, color: Rgb<u8>) {
    let center = circle.center.to_pixel();
    for off in stroke_offsets(thickness) {
        let r = i32::try_from(circle.radius).unwrap_or(i32::MAX).saturating_add(off);
        if r >= 0 {
            draw_hollow_circle_mut(canvas, center, r, color);
        }
    }
}

fn draw_thick_segment(
    canvas: &mut RgbImage,
    from: (f32, f32),
    to: (f32, f32),
    thickness: u32,
    color: Rgb<u8>,
) {
    // Offset along the minor axis so every stroke has the same length.
    let shallow = (to.0 - from.0).abs() >= (to.1 - from.1).abs();
    for off in stroke_offsets(thickness) {
        let (ox, oy) = if shallow {
            (0.0, off as f32)
        } else {
            (off as f32, 0.0)
        };
        draw_line_segment_mut(
            canvas,
            (from.0 + ox, from.1 + oy),
            (to.0 + ox, to.1 + oy),
            color,
        );
    }
}

/// Render the annotated copy of `original`.
///
/// The source buffer is only read; the result is a new image of the same
/// dimensions.
pub fn render_annotation(
    original: &RgbImage,
    cue: &Circle,
    target: &Circle,
    angle: Angle,
    style: &AnnotationStyle,
) -> RgbImage {
    let mut canvas = original.clone();

    draw_thick_circle(&mut canvas, cue, style.outline_thickness, Rgb(style.cue_color));
    draw_thick_circle(
        &mut canvas,
        target,
        style.outline_thickness,
        Rgb(style.target_color),
    );
    draw_thick_segment(
        &mut canvas,
        (cue.center.x.round(), cue.center.y.round()),
        (target.center.x.round(), target.center.y.round()),
        style.line_thickness,
        Rgb(style.line_color),
    );

    let scale = style.label_scale.clamp(1, MAX_LABEL_SCALE);
    let [lx, ly] = style.label_origin;
    let top = ly.saturating_sub((font::GLYPH_H * scale) as i32);
    let label = label_text(angle);
    let right = i64::from(lx) + i64::from(font::text_width(&label, scale));
    if top < 0 || right > i64::from(canvas.width()) {
        tracing::debug!("label '{}' clipped at {}x{}", label, canvas.width(), canvas.height());
    }
    font::draw_text(&mut canvas, lx, top, scale, Rgb(style.label_color), &label);
    canvas
}
