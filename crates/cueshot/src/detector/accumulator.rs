//! Three-dimensional (x, y, r) vote accumulator for the gradient Hough
//! circle transform.
//!
//! Each edge pixel votes, for every radius in `[min_radius, max_radius]`, at
//! the two points that lie that far away along its gradient line (one on each
//! side, so bright-on-dark and dark-on-bright balls both converge). Gradient
//! vectors on a circle outline point through its center, so the true
//! `(center, radius)` cell collects votes from the whole circumference.
//!
//! The spatial grid is coarser than the image by `resolution_factor` (values
//! below 1 act as 1). The volume is never materialized: radius slices are
//! voted one at a time and only the three slices around the one being
//! scanned are kept, so memory is bounded by the image size, not by the
//! radius range. Radii beyond the image diagonal cannot have both a center
//! and an edge pixel inside the image and are not searched.
//!
//! Cells are ordered row-major with the radius index innermost; this linear
//! order is the deterministic tie-break for equal scores.
//!
//! Gradient jitter and the two-pixel-wide outline of a hard edge scatter the
//! votes for one circle over a few neighbouring cells, so peaks are scored
//! on the 3x3 spatial box sum of each radius slice rather than on single
//! cells.

use super::config::DetectionParams;
use super::edges::EdgePoint;

/// Finest accumulator cell, in image pixels.
const MIN_CELL_SIZE: f32 = 1.0;

/// A local maximum of the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Peak {
    /// Linear accumulator index (scan order).
    pub index: usize,
    /// Refined center in image pixel coordinates.
    pub x: f32,
    pub y: f32,
    pub radius: u32,
    /// Votes inside the 3x3 cell window around the peak.
    pub score: u32,
}

/// Raw votes and windowed scores of one radius.
struct Slice {
    votes: Vec<u32>,
    support: Vec<u32>,
}

pub(crate) struct HoughAccumulator {
    cols: usize,
    rows: usize,
    n_radii: usize,
    min_radius: u32,
    dp: f32,
    width: f32,
    height: f32,
}

impl HoughAccumulator {
    pub(crate) fn new(width: u32, height: u32, params: &DetectionParams) -> Self {
        let dp = params.resolution_factor.max(MIN_CELL_SIZE);
        let cols = ((width as f32 / dp).ceil() as usize).max(1);
        let rows = ((height as f32 / dp).ceil() as usize).max(1);
        let diagonal = (width as f64).hypot(height as f64).ceil() as u32;
        let max_radius = params.max_radius.min(diagonal);
        let n_radii = if params.min_radius > max_radius {
            0
        } else {
            (max_radius - params.min_radius + 1) as usize
        };
        Self {
            cols,
            rows,
            n_radii,
            min_radius: params.min_radius,
            dp,
            width: width as f32,
            height: height as f32,
        }
    }

    /// `(cols, rows, radii)` actually searched.
    pub(crate) fn dims(&self) -> (usize, usize, usize) {
        (self.cols, self.rows, self.n_radii)
    }

    #[inline]
    fn index(&self, col: usize, row: usize, ri: usize) -> usize {
        (row * self.cols + col) * self.n_radii + ri
    }

    /// Cell holding image coordinate `v`; cell `i` spans
    /// `[i * dp - 0.5, (i + 1) * dp - 0.5)`.
    #[inline]
    fn cell_of(&self, v: f32, cells: usize) -> usize {
        (((v + 0.5) / self.dp).floor() as usize).min(cells - 1)
    }

    /// Image coordinate at the middle of cell `i`.
    #[inline]
    fn cell_center(&self, i: f32) -> f32 {
        (i + 0.5) * self.dp - 0.5
    }

    /// Cast every edge's votes at radius slice `ri` into `votes`.
    ///
    /// Votes whose center would fall outside the image are dropped. Returns
    /// the number of votes cast.
    fn vote_slice(&self, edges: &[EdgePoint], ri: usize, votes: &mut [u32]) -> u64 {
        votes.fill(0);
        let r = (self.min_radius as usize + ri) as f32;
        let mut cast = 0u64;
        for edge in edges {
            let (x, y) = (edge.x as f32, edge.y as f32);
            for sign in [1.0f32, -1.0] {
                let vx = x + sign * edge.dx * r;
                let vy = y + sign * edge.dy * r;
                if vx < 0.0 || vy < 0.0 || vx >= self.width || vy >= self.height {
                    continue;
                }
                let col = self.cell_of(vx, self.cols);
                let row = self.cell_of(vy, self.rows);
                let cell = &mut votes[row * self.cols + col];
                *cell = cell.saturating_add(1);
                cast += 1;
            }
        }
        cast
    }

    /// 3x3 box sum of `votes`, two separable passes through `scratch`.
    fn box_support(&self, votes: &[u32], scratch: &mut [u32]) -> Vec<u32> {
        let (cols, rows) = (self.cols, self.rows);
        for row in 0..rows {
            let line = &votes[row * cols..(row + 1) * cols];
            for col in 0..cols {
                let hi = (col + 1).min(cols - 1);
                scratch[row * cols + col] = line[col.saturating_sub(1)..=hi]
                    .iter()
                    .fold(0u32, |s, &v| s.saturating_add(v));
            }
        }

        let mut support = vec![0u32; cols * rows];
        for row in 0..rows {
            let hi = (row + 1).min(rows - 1);
            for col in 0..cols {
                support[row * cols + col] = (row.saturating_sub(1)..=hi)
                    .fold(0u32, |s, r2| s.saturating_add(scratch[r2 * cols + col]));
            }
        }
        support
    }

    fn slice(
        &self,
        edges: &[EdgePoint],
        ri: usize,
        scratch: &mut [u32],
        cast: &mut u64,
    ) -> Slice {
        let mut votes = vec![0u32; self.cols * self.rows];
        *cast += self.vote_slice(edges, ri, &mut votes);
        let support = self.box_support(&votes, scratch);
        Slice { votes, support }
    }

    /// Vote `edges` and return the cells whose windowed score exceeds
    /// `threshold` and dominates the 26 neighbouring scores in (x, y, r).
    ///
    /// Among equal neighbours the one earlier in scan order wins, so plateaus
    /// produce a single peak. Peaks are returned in scan order.
    pub(crate) fn local_maxima(&self, edges: &[EdgePoint], threshold: u32) -> Vec<Peak> {
        let mut peaks = Vec::new();
        if self.n_radii == 0 {
            return peaks;
        }

        let mut scratch = vec![0u32; self.cols * self.rows];
        let mut cast = 0u64;
        let mut prev: Option<Slice> = None;
        let mut cur = self.slice(edges, 0, &mut scratch, &mut cast);
        for ri in 0..self.n_radii {
            let next = (ri + 1 < self.n_radii)
                .then(|| self.slice(edges, ri + 1, &mut scratch, &mut cast));
            let window = [
                prev.as_ref().map(|s| s.support.as_slice()),
                Some(cur.support.as_slice()),
                next.as_ref().map(|s| s.support.as_slice()),
            ];
            self.collect_peaks(ri, &cur.votes, window, threshold, &mut peaks);

            match next {
                Some(n) => prev = Some(std::mem::replace(&mut cur, n)),
                None => break,
            }
        }
        tracing::debug!(
            "accumulator {}x{}x{} received {} votes",
            self.cols,
            self.rows,
            self.n_radii,
            cast
        );

        peaks.sort_by_key(|p| p.index);
        peaks
    }

    fn collect_peaks(
        &self,
        ri: usize,
        votes: &[u32],
        window: [Option<&[u32]>; 3],
        threshold: u32,
        peaks: &mut Vec<Peak>,
    ) {
        let Some(support) = window[1] else {
            return;
        };
        for row in 0..self.rows {
            for col in 0..self.cols {
                let v = support[row * self.cols + col];
                if v <= threshold || !self.dominates(&window, col, row, ri, v) {
                    continue;
                }
                let (x, y) = self.refine_center(votes, col, row);
                peaks.push(Peak {
                    index: self.index(col, row, ri),
                    x,
                    y,
                    radius: self.min_radius + ri as u32,
                    score: v,
                });
            }
        }
    }

    /// `window` holds the scores of slices `ri - 1`, `ri` and `ri + 1`.
    fn dominates(
        &self,
        window: &[Option<&[u32]>; 3],
        col: usize,
        row: usize,
        ri: usize,
        v: u32,
    ) -> bool {
        let idx = self.index(col, row, ri);
        for (k, support) in window.iter().enumerate() {
            let Some(support) = support else {
                continue;
            };
            let r2 = ri + k - 1;
            for y2 in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
                for x2 in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                    let nidx = self.index(x2, y2, r2);
                    if nidx == idx {
                        continue;
                    }
                    let nv = support[y2 * self.cols + x2];
                    if nv > v || (nv == v && nidx < idx) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Vote-weighted centroid of the raw votes in the peak's 3x3 window, in
    /// image coordinates clamped into the image.
    fn refine_center(&self, votes: &[u32], col: usize, row: usize) -> (f32, f32) {
        let mut sum = 0.0f32;
        let mut sx = 0.0f32;
        let mut sy = 0.0f32;
        for y2 in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for x2 in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                let w = votes[y2 * self.cols + x2] as f32;
                sum += w;
                sx += w * x2 as f32;
                sy += w * y2 as f32;
            }
        }
        // The window sum is the peak score, which is above the threshold.
        let (cx, cy) = if sum > 0.0 {
            (sx / sum, sy / sum)
        } else {
            (col as f32, row as f32)
        };
        let x = self.cell_center(cx).clamp(0.0, self.width - 1.0);
        let y = self.cell_center(cy).clamp(0.0, self.height - 1.0);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(dp: f32, min_r: u32, max_r: u32) -> DetectionParams {
        DetectionParams {
            resolution_factor: dp,
            min_radius: min_r,
            max_radius: max_r,
            ..Default::default()
        }
    }

    fn edge(x: u32, y: u32, dx: f32, dy: f32) -> EdgePoint {
        EdgePoint {
            x,
            y,
            dx,
            dy,
            magnitude: 1000.0,
        }
    }

    #[test]
    fn grid_shrinks_with_resolution_factor() {
        let acc = HoughAccumulator::new(400, 300, &params(1.2, 10, 40));
        assert_eq!(acc.dims(), (334, 250, 31));
        let acc = HoughAccumulator::new(5, 3, &params(1.0, 2, 2));
        assert_eq!(acc.dims(), (5, 3, 1));
    }

    #[test]
    fn cells_are_never_finer_than_a_pixel() {
        let acc = HoughAccumulator::new(400, 300, &params(0.01, 10, 40));
        assert_eq!(acc.dims(), (400, 300, 31));
    }

    #[test]
    fn radius_range_stops_at_image_diagonal() {
        // Diagonal of 400x300 is 500 px.
        let acc = HoughAccumulator::new(400, 300, &params(1.2, 10, 2_000_000));
        assert_eq!(acc.dims(), (334, 250, 491));

        let acc = HoughAccumulator::new(400, 300, &params(1.2, 600, 900));
        assert_eq!(acc.dims().2, 0);
        assert!(acc
            .local_maxima(&[edge(200, 150, 1.0, 0.0)], 0)
            .is_empty());
    }

    #[test]
    fn votes_land_on_both_sides_of_the_gradient_line() {
        let acc = HoughAccumulator::new(40, 40, &params(1.0, 5, 5));
        let mut votes = vec![0u32; 40 * 40];
        assert_eq!(acc.vote_slice(&[edge(20, 20, 1.0, 0.0)], 0, &mut votes), 2);
        assert_eq!(votes[20 * 40 + 25], 1);
        assert_eq!(votes[20 * 40 + 15], 1);
        assert_eq!(votes.iter().sum::<u32>(), 2);
    }

    #[test]
    fn votes_outside_the_image_are_dropped() {
        let acc = HoughAccumulator::new(40, 40, &params(1.0, 5, 8));
        let mut votes = vec![0u32; 40 * 40];
        // Only the +x side stays inside for every radius.
        let cast: u64 = (0..4)
            .map(|ri| acc.vote_slice(&[edge(2, 20, 1.0, 0.0)], ri, &mut votes))
            .sum();
        assert_eq!(cast, 4);
    }

    #[test]
    fn converging_gradients_form_a_single_peak() {
        let acc = HoughAccumulator::new(60, 60, &params(1.0, 10, 10));
        // Eight edge pixels on a radius-10 circle around (30, 30), gradients
        // pointing at the center.
        let dirs = [
            (1.0f32, 0.0f32),
            (-1.0, 0.0),
            (0.0, 1.0),
            (0.0, -1.0),
            (std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
            (-std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
            (std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
            (-std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
        ];
        let edges: Vec<EdgePoint> = dirs
            .iter()
            .map(|&(dx, dy)| {
                let x = (30.0 - 10.0 * dx).round() as u32;
                let y = (30.0 - 10.0 * dy).round() as u32;
                edge(x, y, dx, dy)
            })
            .collect();
        let peaks = acc.local_maxima(&edges, 4);
        assert_eq!(peaks.len(), 1);
        let p = peaks[0];
        assert_eq!(p.radius, 10);
        assert_eq!(p.score, 8);
        assert!((p.x - 30.0).abs() <= 1.0, "x = {}", p.x);
        assert!((p.y - 30.0).abs() <= 1.0, "y = {}", p.y);
    }

    #[test]
    fn plateau_yields_first_cell_in_scan_order() {
        let acc = HoughAccumulator::new(10, 10, &params(1.0, 3, 3));
        // Nine votes each into cells (4, 4) and (5, 4); the opposite votes
        // fall outside the image.
        let mut edges = vec![edge(1, 4, 1.0, 0.0); 9];
        edges.extend(std::iter::repeat(edge(8, 4, -1.0, 0.0)).take(9));

        // Six windows cover both cells; the first in scan order wins.
        let peaks = acc.local_maxima(&edges, 5);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, acc.index(4, 3, 0));
        assert_eq!(peaks[0].score, 18);
        // Centroid sits between the two voted cells.
        assert!((peaks[0].x - 4.5).abs() < 1e-5);
        assert!((peaks[0].y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn window_score_is_strictly_thresholded() {
        let acc = HoughAccumulator::new(10, 10, &params(1.0, 3, 3));
        let edges = vec![edge(1, 4, 1.0, 0.0); 5];
        assert!(acc.local_maxima(&edges, 5).is_empty());
        assert_eq!(acc.local_maxima(&edges, 4).len(), 1);
    }

    #[test]
    fn equal_scores_across_radii_prefer_the_smaller_radius() {
        // Both slices reach a window score of 10 in overlapping cells; the
        // opposite-side votes fall outside the image.
        let acc = HoughAccumulator::new(20, 20, &params(1.0, 4, 5));
        let mut edges = vec![edge(3, 10, 1.0, 0.0); 6];
        edges.extend(std::iter::repeat(edge(2, 10, 1.0, 0.0)).take(4));
        let peaks = acc.local_maxima(&edges, 3);
        assert_eq!(peaks.len(), 1, "{:?}", peaks);
        assert_eq!(peaks[0].radius, 4);
        assert_eq!(peaks[0].score, 10);
        assert!((peaks[0].y - 10.0).abs() < 1e-5);
    }
}
