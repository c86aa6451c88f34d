use halong::domain::{Language, LanguageTag, Task};

#[test]
fn given_iso_codes_when_parsing_language_then_maps_two_and_three_letter_forms() {
    assert_eq!(Language::from_code("en"), Some(Language::English));
    assert_eq!(Language::from_code("ENG"), Some(Language::English));
    assert_eq!(Language::from_code("vi"), Some(Language::Vietnamese));
    assert_eq!(Language::from_code("vie"), Some(Language::Vietnamese));
    assert_eq!(Language::from_code("fr"), None);
}

#[test]
fn given_language_when_displayed_then_uses_short_code() {
    assert_eq!(Language::English.to_string(), "en");
    assert_eq!(Language::Vietnamese.to_string(), "vi");
}

#[test]
fn given_unknown_code_when_tagging_then_keeps_code_as_unsupported() {
    let tag = LanguageTag::from_code("deu");

    assert_eq!(tag, LanguageTag::Unsupported("deu".to_string()));
    assert_eq!(tag.supported(), None);
    assert_eq!(tag.code(), "deu");
}

#[test]
fn given_supported_code_when_tagging_then_resolves_language() {
    let tag = LanguageTag::from_code("vie");

    assert_eq!(tag.supported(), Some(Language::Vietnamese));
    assert_eq!(tag.code(), "vi");
}

#[test]
fn given_tasks_when_displayed_then_use_resource_names() {
    let names: Vec<String> = Task::ALL.iter().map(Task::to_string).collect();

    assert_eq!(names, vec!["summarize", "keywords", "classify-topic"]);
}
