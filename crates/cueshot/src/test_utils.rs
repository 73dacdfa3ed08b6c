//! Synthetic billiard-table images for unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

pub(crate) const CLOTH: Rgb<u8> = Rgb([20, 90, 40]);
pub(crate) const BALL: Rgb<u8> = Rgb([240, 240, 230]);

/// A filled disc to paint onto the table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ball {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub color: Rgb<u8>,
}

impl Ball {
    pub(crate) fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self {
            cx,
            cy,
            radius,
            color: BALL,
        }
    }
}

/// Render hard-edged discs (no anti-aliasing, no noise) on uniform cloth.
///
/// A pixel belongs to a ball when its distance to the ball center is at most
/// the radius. Later balls paint over earlier ones.
pub(crate) fn draw_table_image(w: u32, h: u32, balls: &[Ball]) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, CLOTH);
    for ball in balls {
        let r2 = ball.radius * ball.radius;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - ball.cx;
                let dy = y as f32 - ball.cy;
                if dx * dx + dy * dy <= r2 {
                    img.put_pixel(x, y, ball.color);
                }
            }
        }
    }
    img
}

/// Grayscale variant of [`draw_table_image`] for detector-only tests.
pub(crate) fn draw_disc_gray(w: u32, h: u32, balls: &[Ball], bg: u8, fg: u8) -> GrayImage {
    let mut img = GrayImage::from_pixel(w, h, Luma([bg]));
    for ball in balls {
        let r2 = ball.radius * ball.radius;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - ball.cx;
                let dy = y as f32 - ball.cy;
                if dx * dx + dy * dy <= r2 {
                    img.put_pixel(x, y, Luma([fg]));
                }
            }
        }
    }
    img
}
