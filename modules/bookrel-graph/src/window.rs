//! Snapshot windowing: turns a reading-progress fraction into a bounded
//! chapter range.

use bookrel_common::{BookRelError, ChapterRange, DEFAULT_WINDOW};

/// Compute the chapter window visible at `progress` through a book of
/// `total_chapters` chapters.
///
/// - `progress` is clamped to [0, 1]; `None`, NaN and infinities mean 1.0.
/// - `window` falls back to [`DEFAULT_WINDOW`] when absent or non-positive.
/// - `to = ceil(progress * total)` clamped to [1, total], `from = max(1, to - window + 1)`.
pub fn compute_window(
    progress: Option<f64>,
    total_chapters: i64,
    window: Option<i64>,
) -> Result<ChapterRange, BookRelError> {
    if total_chapters <= 0 {
        return Err(BookRelError::invalid(format!(
            "totalChapters must be > 0, got {total_chapters}"
        )));
    }

    let p = match progress {
        Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
        _ => 1.0,
    };

    let w = match window {
        Some(w) if w > 0 => w,
        _ => DEFAULT_WINDOW,
    };

    let to = ((p * total_chapters as f64).ceil() as i64).clamp(1, total_chapters);
    let from = (to - w + 1).max(1);

    Ok(ChapterRange { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(progress: Option<f64>, total: i64, window: Option<i64>) -> (i64, i64) {
        let r = compute_window(progress, total, window).unwrap();
        (r.from, r.to)
    }

    #[test]
    fn missing_progress_shows_the_end() {
        assert_eq!(range(None, 50, Some(10)), (41, 50));
    }

    #[test]
    fn zero_progress_shows_first_chapter() {
        assert_eq!(range(Some(0.0), 50, Some(10)), (1, 1));
    }

    #[test]
    fn partial_progress_rounds_up() {
        assert_eq!(range(Some(0.42), 50, Some(10)), (12, 21));
    }

    #[test]
    fn non_finite_progress_means_complete() {
        assert_eq!(range(Some(f64::NAN), 30, Some(5)), (26, 30));
        assert_eq!(range(Some(f64::INFINITY), 30, Some(5)), (26, 30));
        assert_eq!(range(Some(f64::NEG_INFINITY), 30, Some(5)), (26, 30));
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(range(Some(-0.5), 20, Some(3)), (1, 1));
        assert_eq!(range(Some(7.0), 20, Some(3)), (18, 20));
    }

    #[test]
    fn window_defaults_to_ten() {
        assert_eq!(range(Some(1.0), 50, None), (41, 50));
        assert_eq!(range(Some(1.0), 50, Some(0)), (41, 50));
        assert_eq!(range(Some(1.0), 50, Some(-4)), (41, 50));
    }

    #[test]
    fn window_larger_than_book_starts_at_one() {
        assert_eq!(range(Some(1.0), 4, Some(10)), (1, 4));
    }

    #[test]
    fn non_positive_total_is_rejected() {
        for total in [0, -1, -50] {
            let err = compute_window(Some(0.5), total, None).unwrap_err();
            assert!(matches!(err, BookRelError::InvalidArgument(_)));
        }
    }

    #[test]
    fn range_is_always_bounded_and_non_empty() {
        let progresses = [0.0, 0.001, 0.1, 0.333, 0.5, 0.999, 1.0];
        for total in 1..=120 {
            for window in [1, 2, 7, 10, 33, 500] {
                for p in progresses {
                    let r = compute_window(Some(p), total, Some(window)).unwrap();
                    assert!(1 <= r.from && r.from <= r.to && r.to <= total);
                    assert!(r.len() <= window);
                    assert!(!r.is_empty());
                }
            }
        }
    }
}
