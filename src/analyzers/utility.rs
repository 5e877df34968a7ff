/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean over the values that are present; absent entries do not count towards
/// the denominator. Returns 0.0 when nothing is present.
pub fn present_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values.into_iter().flatten().collect();
    mean(&present)
}

/// Mean over the values strictly greater than zero. Absent and zero values are
/// both skipped.
pub fn positive_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let positive: Vec<f64> = values.into_iter().flatten().filter(|v| *v > 0.0).collect();
    mean(&positive)
}

/// Share of `part` in `total` as a percentage. A zero total yields 0.0.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_present_mean_skips_absent() {
        let avg = present_mean([Some(86.7), None, Some(90.0)]);
        assert!((avg - 88.35).abs() < 1e-9);
    }

    #[test]
    fn test_present_mean_keeps_zero() {
        assert_eq!(present_mean([Some(0.0), Some(10.0)]), 5.0);
    }

    #[test]
    fn test_positive_mean_skips_zero_and_absent() {
        assert_eq!(positive_mean([Some(0.0), None, Some(8.0), Some(6.0)]), 7.0);
        assert_eq!(positive_mean([Some(0.0), None]), 0.0);
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
    }
}
