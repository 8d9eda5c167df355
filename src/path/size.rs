/// Format a byte count with IEC units and one decimal.
///
/// ```
/// assert_eq!(fpath::pretty_size(512), "512 B");
/// assert_eq!(fpath::pretty_size(1536), "1.5 KB");
/// ```
pub fn pretty_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let unit = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {unit}B", bytes as f64 / div as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_size() {
        assert_eq!(pretty_size(0), "0 B");
        assert_eq!(pretty_size(1023), "1023 B");
        assert_eq!(pretty_size(1024), "1.0 KB");
        assert_eq!(pretty_size(1024 * 1024), "1.0 MB");
        assert_eq!(pretty_size(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(pretty_size(u64::MAX), "16.0 EB");
    }
}
