use halong::domain::{CandidateLabelSet, StopwordSet, case_fold};

#[test]
fn given_label_file_contents_when_parsing_then_trims_and_skips_blank_lines_in_order() {
    let labels = CandidateLabelSet::from_lines("Technology\n\n  Sports  \r\nHealth\n");

    assert_eq!(labels.labels(), ["Technology", "Sports", "Health"]);
    assert_eq!(labels.len(), 3);
}

#[test]
fn given_mixed_case_stopwords_when_checking_then_matches_case_insensitively() {
    let stopwords = StopwordSet::from_lines("Và\ncủa\n");

    assert!(stopwords.contains("và"));
    assert!(stopwords.contains("CỦA"));
    assert!(!stopwords.contains("kinh"));
    assert_eq!(stopwords.len(), 2);
}

#[test]
fn given_decomposed_vietnamese_when_case_folding_then_matches_composed_form() {
    let decomposed = "Vie\u{0302}\u{0323}t";

    assert_eq!(case_fold(decomposed), "việt");
    assert!(StopwordSet::new(["việt"]).contains(decomposed));
}
