//! Pure calculation functions for the pixel transforms.
//!
//! All functions here are pure and testable without any buffers or I/O.

/// Middle element of five samples after an ascending sort.
///
/// # Examples
/// ```
/// # use hsdec_process::imaging::median_of_five;
/// assert_eq!(median_of_five([9, 0, 4, 0, 7]), 4);
/// // A lone bright sample among four zeros is suppressed
/// assert_eq!(median_of_five([200, 0, 0, 0, 0]), 0);
/// ```
pub fn median_of_five(mut samples: [i32; 5]) -> i32 {
    // Equal values are interchangeable, so an unstable sort is fine
    samples.sort_unstable();
    samples[2]
}

/// Map `value` from `[min, max]` onto `[0, 255]`.
///
/// The division runs in `f64` and the result is truncated toward zero, so
/// `rescale(5, 0, 10)` is `127`, not `128`. Callers must guarantee
/// `max != min`.
pub fn rescale(value: i32, min: i32, max: i32) -> i32 {
    let span = f64::from(max) - f64::from(min);
    ((f64::from(value) - f64::from(min)) / span * 255.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // median_of_five
    // =========================================================================

    #[test]
    fn median_of_sorted_input() {
        assert_eq!(median_of_five([1, 2, 3, 4, 5]), 3);
    }

    #[test]
    fn median_of_unsorted_input() {
        assert_eq!(median_of_five([50, 10, 40, 20, 30]), 30);
    }

    #[test]
    fn median_with_duplicates() {
        assert_eq!(median_of_five([7, 7, 1, 7, 9]), 7);
        assert_eq!(median_of_five([0, 0, 0, 10, 255]), 0);
    }

    #[test]
    fn median_handles_negative_values() {
        assert_eq!(median_of_five([-5, 0, 0, -1, 3]), 0);
        assert_eq!(median_of_five([-5, -4, -3, -2, -1]), -3);
    }

    // =========================================================================
    // rescale
    // =========================================================================

    #[test]
    fn rescale_endpoints() {
        assert_eq!(rescale(10, 10, 50), 0);
        assert_eq!(rescale(50, 10, 50), 255);
    }

    #[test]
    fn rescale_truncates_toward_zero() {
        // 5/10 * 255 = 127.5
        assert_eq!(rescale(5, 0, 10), 127);
        // 1/3 * 255 = 85.0 (within float error, must not become 84)
        assert_eq!(rescale(1, 0, 3), 85);
    }

    #[test]
    fn rescale_full_range_is_identity() {
        for v in 0..=255 {
            assert_eq!(rescale(v, 0, 255), v);
        }
    }

    #[test]
    fn rescale_below_min_goes_negative() {
        // Values under the observed minimum are not clamped
        assert_eq!(rescale(0, 10, 20), -255);
    }
}
