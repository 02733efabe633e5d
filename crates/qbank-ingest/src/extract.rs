//! Question extraction from unstructured text.

use std::sync::LazyLock;

use qbank_model::{CellValue, LogicalField, OptionLetter, RawRecord, RawRow};
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Turns free text into candidate question records.
///
/// Records use the persisted field keys (`question`, `option_a` ...
/// `correct_option`) and are validated like any other import.
pub trait QuestionExtractor {
    fn extract(&self, text: &str) -> Result<Vec<RawRow>>;
}

static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*(.*)$").expect("Invalid question line regex"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Da-d])[).]\s*(.*)$").expect("Invalid option line regex"));

static ANSWER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:answer|ans)\s*:(.*)$").expect("Invalid answer marker regex")
});

static ANSWER_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Da-d])\b").expect("Invalid answer letter regex"));

/// Line-oriented extractor for numbered question lists.
///
/// Recognises input shaped like:
///
/// ```text
/// 1. What is 2+2?
/// A) 3
/// B) 4
/// C. 5
/// D. 6
/// Answer: B
/// ```
///
/// A numbered line starts a new question. Lettered lines fill the options.
/// A line containing `answer:` or `ans:` sets the correct option to the first
/// standalone letter A-D after the marker. Lines before the first question are
/// ignored. The whole text is scanned, whatever its length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScanExtractor;

impl LineScanExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Default)]
struct Draft {
    question: String,
    options: [String; 4],
    answer: Option<OptionLetter>,
}

impl Draft {
    fn into_row(self) -> RawRow {
        let [a, b, c, d] = self.options;
        RawRecord::new()
            .with(LogicalField::Question.key(), self.question)
            .with(LogicalField::OptionA.key(), a)
            .with(LogicalField::OptionB.key(), b)
            .with(LogicalField::OptionC.key(), c)
            .with(LogicalField::OptionD.key(), d)
            .with(
                LogicalField::Answer.key(),
                self.answer
                    .map_or(CellValue::Missing, |letter| CellValue::from(letter.as_str())),
            )
            .into()
    }
}

impl QuestionExtractor for LineScanExtractor {
    fn extract(&self, text: &str) -> Result<Vec<RawRow>> {
        let mut rows = Vec::new();
        let mut current: Option<Draft> = None;

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(captures) = QUESTION_LINE.captures(line) {
                if let Some(draft) = current.take() {
                    rows.push(draft.into_row());
                }
                current = Some(Draft {
                    question: captures[1].trim().to_string(),
                    ..Draft::default()
                });
                continue;
            }

            let Some(draft) = current.as_mut() else {
                continue;
            };

            if let Some(captures) = OPTION_LINE.captures(line)
                && let Some(letter) = OptionLetter::parse(&captures[1])
            {
                draft.options[letter.index()] = captures[2].trim().to_string();
            } else if let Some(captures) = ANSWER_MARKER.captures(line) {
                if let Some(letter) = ANSWER_LETTER
                    .captures(&captures[1])
                    .and_then(|found| OptionLetter::parse(&found[1]))
                {
                    draft.answer = Some(letter);
                }
            }
        }

        if let Some(draft) = current {
            rows.push(draft.into_row());
        }

        debug!(questions = rows.len(), "extracted questions from text");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(row: &RawRow, key: &str) -> Option<String> {
        row.as_record()?.get(key)?.to_text()
    }

    #[test]
    fn test_numbered_questions() {
        let text = "Chapter 1\n\n1. What is 2+2?\nA) 3\nB) 4\nc. 5\nD. 6\nAnswer: b\n2. Capital of France?\n a) Paris\n";
        let rows = LineScanExtractor::new().extract(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(text_of(&rows[0], "question").as_deref(), Some("What is 2+2?"));
        assert_eq!(text_of(&rows[0], "option_c").as_deref(), Some("5"));
        assert_eq!(text_of(&rows[0], "correct_option").as_deref(), Some("B"));
        assert_eq!(text_of(&rows[1], "option_a").as_deref(), Some("Paris"));
        assert_eq!(text_of(&rows[1], "option_b").as_deref(), Some(""));
        assert_eq!(text_of(&rows[1], "correct_option"), None);
    }

    #[test]
    fn test_answer_marker_letter_comes_after_colon() {
        let rows = LineScanExtractor::new()
            .extract("1. Q\nAns: (C)\n")
            .unwrap();
        assert_eq!(text_of(&rows[0], "correct_option").as_deref(), Some("C"));
    }

    #[test]
    fn test_long_documents_are_scanned_to_the_end() {
        let text: String = (1..=80)
            .map(|n| {
                format!(
                    "{n}. Which value is number {n} in the list?\n\
                     A) first {n}\nB) second {n}\nC) third {n}\nD) fourth {n}\nAnswer: C\n"
                )
            })
            .collect();
        assert!(text.chars().count() > 5000);

        let rows = LineScanExtractor::new().extract(&text).unwrap();

        assert_eq!(rows.len(), 80);
        let last = &rows[79];
        assert_eq!(
            text_of(last, "question").as_deref(),
            Some("Which value is number 80 in the list?")
        );
        assert_eq!(text_of(last, "option_d").as_deref(), Some("fourth 80"));
        assert_eq!(text_of(last, "correct_option").as_deref(), Some("C"));
    }
}
