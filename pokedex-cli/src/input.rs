//! REPL input normalisation.

/// Lowercases and trims `text`, then splits it on whitespace.
///
/// Blank input yields an empty vector.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
