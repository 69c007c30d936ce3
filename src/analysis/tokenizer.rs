//! Space tokenizer.
//!
//! Words are separated by the ASCII space character only. Runs of spaces
//! collapse and leading or trailing spaces are ignored. Every other
//! character, including TAB and newline, belongs to a word; those control
//! characters are then rejected by [`is_valid_word`].

/// Split `text` into words, borrowing from the input.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::split_into_words;
///
/// let words: Vec<&str> = split_into_words("  white cat  and   fancy collar ").collect();
/// assert_eq!(words, vec!["white", "cat", "and", "fancy", "collar"]);
/// ```
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it contains no control characters (`0x00`-`0x1F`).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_collapses_spaces() {
        let words: Vec<&str> = split_into_words("hello  world test").collect();
        assert_eq!(words, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_split_empty_and_blank() {
        assert_eq!(split_into_words("").count(), 0);
        assert_eq!(split_into_words("     ").count(), 0);
    }

    #[test]
    fn test_tab_is_not_a_separator() {
        let words: Vec<&str> = split_into_words("cat\tdog bird").collect();
        assert_eq!(words, vec!["cat\tdog", "bird"]);
        assert!(!is_valid_word(words[0]));
        assert!(is_valid_word(words[1]));
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("skvorets"));
        assert!(is_valid_word("ёж"));
        assert!(is_valid_word("-"));
        assert!(!is_valid_word("bad\u{12}word"));
        assert!(!is_valid_word("\u{0}"));
        assert!(!is_valid_word("line\n"));
    }
}
