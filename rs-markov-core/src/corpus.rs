//! Turns raw text into symbol sequences suitable for training.
//!
//! Everything is lowercased so that "The" and "the" share statistics.

/// Splits `text` into lowercase word tokens.
///
/// Tokens are separated by any whitespace, line breaks included.
/// Punctuation stays attached to its word.
pub fn words(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_lowercase).collect()
}

/// Splits `text` into lowercase characters.
///
/// Line breaks are kept, so sentence boundaries become symbols too.
/// Blank input yields nothing.
pub fn chars(text: &str) -> Vec<char> {
	if text.trim().is_empty() {
		return Vec::new();
	}
	text.chars().flat_map(char::to_lowercase).collect()
}

/// Joins word tokens back into a single line.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
	words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn words_are_lowercased_and_split() {
		assert_eq!(words("The cat\n sat  ON\tthe mat."), vec!["the", "cat", "sat", "on", "the", "mat."]);
	}

	#[test]
	fn blank_text_has_no_tokens() {
		assert!(words("  \n\t ").is_empty());
		assert!(chars(" \n ").is_empty());
		assert!(chars("").is_empty());
	}

	#[test]
	fn chars_keep_line_breaks() {
		assert_eq!(chars("Ab\nc"), vec!['a', 'b', '\n', 'c']);
	}

	#[test]
	fn join_words_uses_single_spaces() {
		assert_eq!(join_words(&["a", "b", "c"]), "a b c");
		assert_eq!(join_words::<String>(&[]), "");
	}
}
