/// Whether two snapshots were captured close enough together to show the
/// same people.
///
/// Unknown capture times never exclude a frame: if either timestamp is
/// missing the pair is treated as eligible.
pub fn is_temporal_neighbor(a: Option<i64>, b: Option<i64>, window_secs: i64) -> bool {
    match (a, b) {
        (Some(t1), Some(t2)) => {
            u64::try_from(window_secs).is_ok_and(|window| t1.abs_diff(t2) <= window)
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::domain::capture_metadata::extract_capture_time;
    use rstest::rstest;

    #[rstest]
    #[case(Some(100), Some(105), true)]
    #[case(Some(100), Some(115), true)]
    #[case(Some(100), Some(116), false)]
    #[case(Some(116), Some(100), false)]
    #[case(Some(100), Some(100), true)]
    #[case(None, Some(100), true)]
    #[case(Some(100), None, true)]
    #[case(None, None, true)]
    fn test_fifteen_second_window(
        #[case] a: Option<i64>,
        #[case] b: Option<i64>,
        #[case] expected: bool,
    ) {
        assert_eq!(is_temporal_neighbor(a, b, 15), expected);
    }

    #[rstest]
    #[case(Some(i64::MIN), Some(i64::MAX), false)]
    #[case(Some(i64::MAX), Some(i64::MIN), false)]
    #[case(Some(i64::MAX), Some(i64::MAX - 15), true)]
    fn test_extreme_capture_times_do_not_overflow(
        #[case] a: Option<i64>,
        #[case] b: Option<i64>,
        #[case] expected: bool,
    ) {
        assert_eq!(is_temporal_neighbor(a, b, 15), expected);
    }

    #[test]
    fn test_extreme_hex_prefixes_are_not_neighbors() {
        let a = extract_capture_time("-8000000000000000_pan0_tilt0.jpg");
        let b = extract_capture_time("7fffffffffffffff_pan0_tilt0.jpg");
        assert_eq!(a, Some(i64::MIN));
        assert!(!is_temporal_neighbor(a, b, 15));
    }

    #[test]
    fn test_negative_window_admits_nothing_dated() {
        assert!(!is_temporal_neighbor(Some(100), Some(100), -1));
        assert!(is_temporal_neighbor(None, Some(100), -1));
    }
}
