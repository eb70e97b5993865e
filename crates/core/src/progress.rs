//! Completion ratios shared by pillars, departments and dashboard totals.

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `completed` over `total`, rounded to two decimals.
///
/// Returns `0.0` when `total` is zero. `completed` is clamped to `total` so the
/// result always lies in `[0, 100]`.
pub fn completion_ratio(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let completed = completed.min(total);
    round2(completed as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(completion_ratio(0, 0), 0.0);
        assert_eq!(completion_ratio(3, 0), 0.0);
    }

    #[test]
    fn two_of_three_rounds_to_two_decimals() {
        assert_eq!(completion_ratio(2, 3), 66.67);
        assert_eq!(completion_ratio(1, 3), 33.33);
        assert_eq!(completion_ratio(3, 3), 100.0);
    }

    #[test]
    fn round2_truncates_long_fractions() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.5), 12.5);
        assert_eq!(round2(0.0), 0.0);
    }
}
