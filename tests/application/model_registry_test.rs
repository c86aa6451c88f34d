use std::sync::Arc;

use halong::application::ports::{GenerationParams, InferenceError, TextGenerator};
use halong::application::services::{
    KeywordBinding, ModelRegistry, ModelResource, RegistryError, SummarizerBinding, TopicBinding,
};
use halong::domain::{CandidateLabelSet, Language, Task};
use halong::infrastructure::inference::{MockTextGenerator, MockZeroShotClassifier};
use halong::infrastructure::keywords::YakeKeywordExtractor;

use crate::helpers::{EN_TEMPLATE, Resources, test_labels};

fn summarizer() -> SummarizerBinding {
    let generator: Arc<dyn TextGenerator> = Arc::new(MockTextGenerator::new());
    SummarizerBinding {
        generator,
        input_prefix: String::new(),
        params: GenerationParams::default(),
    }
}

fn keywords() -> KeywordBinding {
    KeywordBinding {
        extractor: Arc::new(YakeKeywordExtractor::new()),
        post_filter: None,
    }
}

fn topic(labels: CandidateLabelSet) -> TopicBinding {
    TopicBinding {
        classifier: Arc::new(MockZeroShotClassifier::new()),
        labels: Arc::new(labels),
        hypothesis_template: EN_TEMPLATE.to_string(),
        multi_label: true,
    }
}

#[test]
fn given_every_task_and_language_bound_when_building_then_registry_holds_six_resources() {
    let registry = Resources::default_set().registry();

    assert_eq!(registry.len(), Task::ALL.len() * Language::ALL.len());
    for task in Task::ALL {
        for language in Language::ALL {
            let resource = registry.resource(task, language).unwrap();
            assert_eq!(resource.task(), task);
        }
    }
}

#[test]
fn given_missing_vietnamese_summarizer_when_building_then_fails_with_missing_resource() {
    let result = ModelRegistry::builder()
        .summarizer(Language::English, summarizer())
        .keywords(Language::English, keywords())
        .keywords(Language::Vietnamese, keywords())
        .topic(Language::English, topic(test_labels()))
        .topic(Language::Vietnamese, topic(test_labels()))
        .build();

    assert!(matches!(
        result,
        Err(RegistryError::MissingResource {
            task: Task::Summarize,
            language: Language::Vietnamese
        })
    ));
}

#[test]
fn given_empty_label_set_when_building_then_fails() {
    let empty = CandidateLabelSet::new(vec!["   ".to_string()]);
    let result = ModelRegistry::builder()
        .summarizer(Language::English, summarizer())
        .summarizer(Language::Vietnamese, summarizer())
        .keywords(Language::English, keywords())
        .keywords(Language::Vietnamese, keywords())
        .topic(Language::English, topic(empty.clone()))
        .topic(Language::Vietnamese, topic(empty))
        .build();

    assert!(matches!(result, Err(RegistryError::EmptyLabelSet)));
}

#[test]
fn given_built_registry_when_looking_up_typed_bindings_then_each_matches_its_task() {
    let registry = Resources::default_set().registry();

    assert_eq!(
        registry.summarizer(Language::Vietnamese).unwrap().input_prefix,
        "summarize: "
    );
    assert!(registry.keywords(Language::English).unwrap().post_filter.is_none());
    assert!(registry.keywords(Language::Vietnamese).unwrap().post_filter.is_some());
    assert_eq!(
        registry.topic(Language::English).unwrap().hypothesis_template,
        EN_TEMPLATE
    );
    assert!(matches!(
        registry.resource(Task::Topic, Language::Vietnamese),
        Some(ModelResource::Topic(_))
    ));
}

#[test]
fn given_resource_unavailable_error_when_displayed_then_names_task_and_language() {
    let error = InferenceError::ResourceUnavailable {
        task: Task::Summarize,
        language: Language::Vietnamese,
    };

    assert_eq!(
        error.to_string(),
        "no summarize resource registered for language vi"
    );
}
