//! Time labels.

/// Format seconds as `mm:ss`, flooring both parts.
///
/// Minutes are not wrapped into hours, so 3725 s renders as `62:05`.
/// Negative and non-finite values render as `00:00`.
pub fn format_timestamp(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "00:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(5.9), "00:05");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(3725.4), "62:05");
        assert_eq!(format_timestamp(-2.0), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
    }
}
