/// Split text on single ASCII spaces into borrowed tokens.
///
/// Runs of spaces, as well as leading and trailing spaces, would otherwise
/// produce empty tokens; those are dropped here so callers never see them.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A word is valid unless it contains a control character (below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}
