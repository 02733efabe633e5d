//! Integration tests for header resolution.

use proptest::prelude::*;
use qbank_map::{resolve_headers, resolve_headers_strict};
use qbank_model::{FieldMapping, Language, LogicalField};

#[test]
fn missing_option_d_is_named() {
    let resolution = resolve_headers(&["Question", "OptionA", "OptionB", "OptionC"]);
    // "optiona" is neither an alias nor a bilingual column, so only exact
    // alias spellings count.
    assert!(!resolution.valid);
    assert!(resolution.mapping.is_none());
    assert!(resolution.missing.contains(&LogicalField::OptionD));

    let resolution = resolve_headers(&["Question", "Option_A", "Option_B", "Option_C"]);
    assert!(!resolution.valid);
    assert_eq!(resolution.missing, vec![LogicalField::OptionD]);
    assert!(
        resolution
            .warnings
            .iter()
            .any(|warning| warning == "No Option D column found")
    );
}

#[test]
fn every_option_bilingual() {
    let headers = [
        "Question_EN",
        "Question_HI",
        "OptionA_EN",
        "OptionA_HI",
        "OptionB_EN",
        "OptionB_HI",
        "OptionC_EN",
        "OptionC_HI",
        "OptionD_EN",
        "OptionD_HI",
        "Correct_Option",
    ];
    let mapping = resolve_headers_strict(&headers).expect("mapping");
    assert_eq!(
        mapping.bilingual_fields(),
        vec![
            LogicalField::Question,
            LogicalField::OptionA,
            LogicalField::OptionB,
            LogicalField::OptionC,
            LogicalField::OptionD,
        ]
    );
    assert_eq!(mapping.answer, FieldMapping::single("correct_option"));
    assert_eq!(
        mapping.option_c.source_headers(),
        vec!["optionc_en", "optionc_hi"]
    );
}

#[test]
fn bilingual_and_single_forms_prefer_bilingual() {
    let mapping = resolve_headers_strict(&[
        "Question",
        "Question_TA",
        "Option_A",
        "Option_B",
        "Option_C",
        "Option_D",
    ])
    .expect("mapping");
    match mapping.question {
        FieldMapping::Bilingual { per_language, .. } => {
            assert_eq!(per_language.keys().copied().collect::<Vec<_>>(), vec![Language::Ta]);
        }
        other => panic!("expected bilingual, got {other:?}"),
    }
}

#[test]
fn resolution_serializes_for_reports() {
    let resolution = resolve_headers(&["question"]);
    let value = serde_json::to_value(&resolution).expect("json");
    assert_eq!(value["valid"], false);
    assert_eq!(value["mapping"], serde_json::Value::Null);
    assert_eq!(value["missing"][0], "option_a");
}

fn case_variant(header: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), header.len()).prop_map(move |upper| {
        header
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #[test]
    fn header_case_and_padding_do_not_matter(
        question in case_variant("question"),
        option_a in case_variant("option_a"),
        pad in "[ \t]{0,3}",
    ) {
        let headers = vec![
            format!("{pad}{question}{pad}"),
            option_a,
            "b".to_string(),
            "c".to_string(),
            "D".to_string(),
        ];
        let mapping = resolve_headers_strict(&headers).expect("mapping");
        prop_assert_eq!(mapping.question, FieldMapping::single("question"));
        prop_assert_eq!(mapping.option_a, FieldMapping::single("option_a"));
    }

    #[test]
    fn column_order_does_not_change_mapping(seed in any::<u64>()) {
        let mut headers = vec![
            "Question_EN", "Question_TE", "Option_A", "Option_B", "Option_C", "Option_D", "Answer",
        ];
        let reference = resolve_headers_strict(&headers).expect("mapping");
        let len = headers.len();
        headers.rotate_left((seed % len as u64) as usize);
        let rotated = resolve_headers_strict(&headers).expect("mapping");
        prop_assert_eq!(reference, rotated);
    }
}
