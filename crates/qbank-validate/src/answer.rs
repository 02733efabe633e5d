//! Answer resolution.
//!
//! An answer cell may name the correct option by letter (`"b"`), by 1-based
//! number (`"2"`) or by repeating the option text. The first form that
//! matches wins, in that order.

use qbank_common::parse_i64;
use qbank_model::{OptionLetter, UNRESOLVED_INDEX};
use serde::Serialize;

/// A resolved answer: the canonical letter and its zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedAnswer {
    pub letter: Option<OptionLetter>,
    /// `0..=3`, or [`UNRESOLVED_INDEX`].
    pub index: i32,
}

impl ResolvedAnswer {
    pub const UNRESOLVED: Self = Self {
        letter: None,
        index: UNRESOLVED_INDEX,
    };

    pub fn from_letter(letter: OptionLetter) -> Self {
        Self {
            letter: Some(letter),
            index: letter.index() as i32,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.letter.is_some()
    }

    /// The letter as stored on a normalized row, `""` when unresolved.
    pub fn letter_str(&self) -> &'static str {
        self.letter.map_or("", OptionLetter::as_str)
    }
}

/// Resolves a raw answer against the four option texts.
///
/// # Examples
///
/// ```
/// use qbank_model::OptionLetter;
/// use qbank_validate::resolve_answer;
///
/// let options = ["3", "4", "5", "6"];
/// assert_eq!(resolve_answer("b", &options).letter, Some(OptionLetter::B));
/// assert_eq!(resolve_answer("4", &options).index, 3);
/// assert_eq!(resolve_answer("seven", &options).index, -1);
/// ```
pub fn resolve_answer(raw: &str, options: &[&str; 4]) -> ResolvedAnswer {
    let value = raw.trim();
    if value.is_empty() {
        return ResolvedAnswer::UNRESOLVED;
    }

    if let Some(letter) = OptionLetter::parse(value) {
        return ResolvedAnswer::from_letter(letter);
    }

    if let Some(number) = parse_i64(value)
        && let Some(letter) = number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(OptionLetter::from_index)
    {
        return ResolvedAnswer::from_letter(letter);
    }

    let needle = value.to_lowercase();
    options
        .iter()
        .position(|option| {
            let option = option.trim();
            !option.is_empty() && option.to_lowercase() == needle
        })
        .and_then(OptionLetter::from_index)
        .map_or(ResolvedAnswer::UNRESOLVED, ResolvedAnswer::from_letter)
}

/// Parses a letter-only answer, as entered while editing a preview row.
///
/// Unlike [`resolve_answer`], numbers and option texts are not accepted.
pub fn resolve_letter(raw: &str) -> ResolvedAnswer {
    OptionLetter::parse(raw).map_or(ResolvedAnswer::UNRESOLVED, ResolvedAnswer::from_letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: [&str; 4] = ["Paris", "London", " Rome ", ""];

    #[test]
    fn empty_is_unresolved() {
        assert_eq!(resolve_answer("", &OPTIONS), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_answer("   ", &OPTIONS), ResolvedAnswer::UNRESOLVED);
    }

    #[test]
    fn letters_ignore_case() {
        assert_eq!(resolve_answer(" d ", &OPTIONS).index, 3);
        assert_eq!(resolve_answer("A", &OPTIONS).letter, Some(OptionLetter::A));
    }

    #[test]
    fn numbers_one_to_four() {
        assert_eq!(resolve_answer("1", &OPTIONS).letter, Some(OptionLetter::A));
        assert_eq!(resolve_answer("4", &OPTIONS).letter, Some(OptionLetter::D));
        assert_eq!(resolve_answer("0", &OPTIONS), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_answer("5", &OPTIONS), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_answer("2.5", &OPTIONS), ResolvedAnswer::UNRESOLVED);
    }

    #[test]
    fn numerals_must_be_bare_integers() {
        // Numeric cells already render "2.0" as "2"; text cells are taken literally.
        assert_eq!(resolve_answer("2.0", &OPTIONS), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_answer("3abc", &OPTIONS), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_answer(" +3 ", &OPTIONS).letter, Some(OptionLetter::C));
    }

    #[test]
    fn option_text_match() {
        assert_eq!(resolve_answer("london", &OPTIONS).letter, Some(OptionLetter::B));
        assert_eq!(resolve_answer("ROME", &OPTIONS).letter, Some(OptionLetter::C));
        assert_eq!(resolve_answer("Berlin", &OPTIONS), ResolvedAnswer::UNRESOLVED);
    }

    #[test]
    fn letter_beats_option_text() {
        // Option B's text is "a", but the letter reading comes first.
        let options = ["x", "a", "y", "z"];
        assert_eq!(resolve_answer("a", &options).letter, Some(OptionLetter::A));
    }

    #[test]
    fn number_beats_option_text() {
        let options = ["3", "2", "1", "4"];
        assert_eq!(resolve_answer("2", &options).letter, Some(OptionLetter::B));
    }

    #[test]
    fn first_matching_option_wins() {
        let options = ["same", "Same", "other", "x"];
        assert_eq!(resolve_answer("SAME", &options).index, 0);
    }

    #[test]
    fn letter_only_resolution() {
        assert_eq!(resolve_letter(" c ").letter, Some(OptionLetter::C));
        assert_eq!(resolve_letter("3"), ResolvedAnswer::UNRESOLVED);
        assert_eq!(resolve_letter("").letter_str(), "");
    }
}
