//! Row validity rules shared by import and preview editing.

use qbank_model::ErrorTag;

use crate::answer::ResolvedAnswer;

/// Collects the error tags for a row's content, in fixed order.
///
/// Text is considered present when it has non-whitespace content.
pub fn diagnose(question: &str, options: &[&str; 4], answer: &ResolvedAnswer) -> Vec<ErrorTag> {
    let mut errors = Vec::new();
    if question.trim().is_empty() {
        errors.push(ErrorTag::MissingQuestion);
    }
    if options.iter().any(|option| option.trim().is_empty()) {
        errors.push(ErrorTag::MissingOptions);
    }
    if !answer.is_valid() {
        errors.push(ErrorTag::InvalidAnswer);
    }
    errors
}
