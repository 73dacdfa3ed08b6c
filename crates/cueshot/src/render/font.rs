//! Minimal 5x7 bitmap font for the angle label.
//!
//! Covers exactly the characters the label can contain. Each glyph is seven
//! rows; bit 4 of a row is the leftmost column.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub(crate) const GLYPH_W: u32 = 5;
pub(crate) const GLYPH_H: u32 = 7;
/// Horizontal advance per character, in font pixels.
const ADVANCE: u32 = GLYPH_W + 1;

fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'g' => [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        _ => return None,
    };
    Some(rows)
}

/// Width in image pixels of `text` drawn at `scale`, saturating.
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    n.saturating_mul(ADVANCE)
        .saturating_sub(1)
        .saturating_mul(scale)
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Each font pixel becomes a `scale` x `scale` block. Characters without a
/// glyph (including space) only advance the pen. Blocks are clipped to the
/// canvas; drawing stops once the pen leaves it.
pub(crate) fn draw_text(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    scale: u32,
    color: Rgb<u8>,
    text: &str,
) {
    let scale = scale.max(1);
    let step = i64::from(scale);
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let mut pen_x = i64::from(x);
    for c in text.chars() {
        if pen_x >= cw {
            break;
        }
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                let py = i64::from(y) + row as i64 * step;
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let px = pen_x + i64::from(col) * step;
                    fill_clipped(canvas, px, py, step, color);
                }
            }
        }
        pen_x += i64::from(ADVANCE) * step;
    }
}

/// Fill the `size` x `size` block at `(x, y)`, clipped to the canvas.
fn fill_clipped(canvas: &mut RgbImage, x: i64, y: i64, size: i64, color: Rgb<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + size).min(i64::from(canvas.width()));
    let y1 = (y + size).min(i64::from(canvas.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    // Clipped to the canvas, so every value fits the rect types.
    let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn label_characters_all_have_glyphs() {
        for c in "Shoot Angle: -0123456789. deg".chars().filter(|c| *c != ' ') {
            assert!(glyph(c).is_some(), "missing glyph for {:?}", c);
        }
    }

    #[test]
    fn glyph_rows_fit_five_columns() {
        for c in "0123456789-.:ASdeghlnot".chars() {
            let rows = glyph(c).unwrap();
            assert!(rows.iter().all(|r| *r < 0x20), "{:?}", c);
        }
    }

    #[test]
    fn draws_scaled_blocks() {
        let mut img = RgbImage::new(20, 20);
        draw_text(&mut img, 2, 3, 2, WHITE, "-");
        // Row 3 of '-' is full width: columns 0..5 -> x 2..12, y 3+6..3+8.
        for x in 2..12 {
            assert_eq!(*img.get_pixel(x, 9), WHITE);
            assert_eq!(*img.get_pixel(x, 10), WHITE);
        }
        assert_eq!(*img.get_pixel(12, 9), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(5, 8), Rgb([0, 0, 0]));
        assert_eq!(text_width("-", 2), 10);
        assert_eq!(text_width("--", 1), 11);
    }

    #[test]
    fn clips_at_canvas_edges() {
        let mut img = RgbImage::new(8, 8);
        draw_text(&mut img, -3, -3, 3, WHITE, "8");
        draw_text(&mut img, 6, 6, 3, WHITE, "Shoot");
        assert_eq!(img.dimensions(), (8, 8));
    }

    #[test]
    fn huge_scale_and_far_origin_do_not_wrap() {
        let mut img = RgbImage::new(16, 16);
        draw_text(&mut img, i32::MAX - 2, 0, 3, WHITE, "88");
        draw_text(&mut img, i32::MIN, i32::MIN, u32::MAX, WHITE, "Shoot 8");
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));

        // One block covering the whole canvas from just above-left of it.
        draw_text(&mut img, -1, -1, 1 << 20, WHITE, "7");
        assert_eq!(*img.get_pixel(15, 15), WHITE);

        assert_eq!(text_width("Shoot", u32::MAX), u32::MAX);
    }
}
