/// Finds the length of the common prefix between a key and an edge label.
///
/// The result is a byte length that always falls on a `char` boundary of
/// both strings, so it can be used to slice either of them.
pub fn prefix_match(key: &str, label: &str) -> usize {
    let mut matched = 0;

    for (a, b) in key.chars().zip(label.chars()) {
        if a != b {
            break;
        }
        matched += a.len_utf8();
    }

    matched
}

/// Emits a `trace`-level event when the `tracing` feature is enabled and
/// expands to nothing otherwise.
macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}
