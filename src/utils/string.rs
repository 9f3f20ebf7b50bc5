//! String manipulation utilities

/// Pluralize a word based on count, turning a trailing consonant-y into
/// "-ies" ("dependency" becomes "dependencies")
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    match word.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) => format!("{stem}ies"),
        _ => format!("{word}s"),
    }
}
