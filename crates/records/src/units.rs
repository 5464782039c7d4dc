const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable label for a byte count, dividing by 1024 per unit
///
/// Stops at the first unit where the value is below 1024, or at `GB`.
pub fn bytes_to_size(size: f64, decimal_places: usize) -> String {
    let mut size = size;
    for unit in &UNITS[..UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{:.*}{}", decimal_places, size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.*}{}", decimal_places, size, UNITS[UNITS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes() {
        assert_eq!(bytes_to_size(100.0, 0), "100B");
        assert_eq!(bytes_to_size(1023.0, 0), "1023B");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(bytes_to_size(1024.0, 0), "1KB");
        assert_eq!(bytes_to_size(1024.0 * 1024.0, 0), "1MB");
        assert_eq!(bytes_to_size(10.0 * 1024.0 * 1024.0, 0), "10MB");
        assert_eq!(bytes_to_size(1024.0 * 1024.0 * 1024.0, 0), "1GB");
    }

    #[test]
    fn test_stops_at_gigabytes() {
        assert_eq!(bytes_to_size(4096.0 * 1024.0 * 1024.0 * 1024.0, 0), "4096GB");
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(bytes_to_size(1536.0, 1), "1.5KB");
        assert_eq!(bytes_to_size(100.0, 2), "100.00B");
    }
}
