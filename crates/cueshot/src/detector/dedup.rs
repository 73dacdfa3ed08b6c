//! Center-distance suppression of accumulator peaks.

use super::accumulator::Peak;

fn sort_by_score(peaks: Vec<Peak>) -> Vec<Peak> {
    let mut peaks = peaks;
    peaks.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    peaks
}

fn dedup_by_proximity(peaks: Vec<Peak>, radius: f32) -> Vec<Peak> {
    let r2 = radius * radius;
    let mut kept: Vec<Peak> = Vec::with_capacity(peaks.len());

    for peak in peaks {
        let crowded = kept.iter().any(|k| {
            let dx = k.x - peak.x;
            let dy = k.y - peak.y;
            dx * dx + dy * dy < r2
        });
        if !crowded {
            kept.push(peak);
        }
    }
    kept
}

/// Greedy non-maximum suppression over accumulator peaks.
///
/// Peaks are visited strongest first (equal scores: earlier accumulator index
/// first). A peak is dropped when its center lies closer than `radius` to a
/// peak that was already kept. The result stays ordered by descending score.
pub(crate) fn suppress_close_peaks(peaks: Vec<Peak>, radius: f32) -> Vec<Peak> {
    dedup_by_proximity(sort_by_score(peaks), radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(index: usize, x: f32, y: f32, score: u32) -> Peak {
        Peak {
            index,
            x,
            y,
            radius: 10,
            score,
        }
    }

    #[test]
    fn keeps_strongest_of_a_cluster() {
        let peaks = vec![
            peak(0, 10.0, 10.0, 40),
            peak(1, 15.0, 10.0, 80),
            peak(2, 100.0, 10.0, 50),
        ];
        let kept = suppress_close_peaks(peaks, 30.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].index, 1);
        assert_eq!(kept[1].index, 2);
    }

    #[test]
    fn equal_scores_resolve_by_index() {
        let peaks = vec![peak(7, 50.0, 50.0, 60), peak(3, 55.0, 50.0, 60)];
        let kept = suppress_close_peaks(peaks, 30.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 3);
    }

    #[test]
    fn suppression_is_against_kept_peaks_only() {
        // B is suppressed by A; C is far from A but near B and survives.
        let peaks = vec![
            peak(0, 0.0, 0.0, 90),
            peak(1, 20.0, 0.0, 70),
            peak(2, 40.0, 0.0, 60),
        ];
        let kept = suppress_close_peaks(peaks, 30.0);
        let idx: Vec<usize> = kept.iter().map(|p| p.index).collect();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn distance_equal_to_radius_is_not_suppressed() {
        let peaks = vec![peak(0, 0.0, 0.0, 90), peak(1, 30.0, 0.0, 70)];
        assert_eq!(suppress_close_peaks(peaks, 30.0).len(), 2);
    }
}
