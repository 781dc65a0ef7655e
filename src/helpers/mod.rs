pub mod arch_mapper;
pub mod path_deriver;

/// Pick the latest of a product's version keys.
///
/// Keys are compared as plain strings, which orders the date-stamped keys
/// Simplestreams publishes (`20180509`, `20180509.1`) correctly. Returns `None`
/// only for an empty input.
pub fn latest_of<'a, I>(version_keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    version_keys.into_iter().max()
}

#[cfg(test)]
mod tests {
    use super::latest_of;

    #[test]
    fn picks_lexicographic_maximum() {
        let keys = ["20180505", "20180509", "20180507"];
        assert_eq!(latest_of(keys), Some("20180509"));
    }

    #[test]
    fn point_release_sorts_after_base_date() {
        let keys = ["20180509.1", "20180509"];
        assert_eq!(latest_of(keys), Some("20180509.1"));
    }

    #[test]
    fn ordering_is_not_numeric() {
        // "9" > "10" byte-wise; unpadded keys are taken as published.
        assert_eq!(latest_of(["10", "9"]), Some("9"));
    }

    #[test]
    fn empty_input_has_no_latest() {
        assert_eq!(latest_of(std::iter::empty()), None);
    }
}
