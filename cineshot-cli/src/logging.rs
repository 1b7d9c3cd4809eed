// cineshot-cli/src/logging.rs
//
// Logging helpers. The actual logging backend is env_logger, initialized in
// main.rs and driven by RUST_LOG (info by default, debug/trace for more).

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// Used to name per-run report directories so repeated runs never clobber
/// each other.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.chars().nth(8), Some('_'));
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }
}
