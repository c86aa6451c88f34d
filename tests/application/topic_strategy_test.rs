use std::sync::Arc;
use std::time::Duration;

use halong::application::ports::LabelScore;
use halong::application::services::{DEFAULT_TOP_K, TopicStrategy, round_score, top_topics};
use halong::domain::Language;

use crate::helpers::{
    EN_TEMPLATE, FixedKeywordExtractor, RecordingGenerator, Resources, ScriptedClassifier,
};

fn label(label: &str, score: f32) -> LabelScore {
    LabelScore {
        label: label.to_string(),
        score,
    }
}

#[test]
fn given_unsorted_scores_when_selecting_top_topics_then_sorted_descending_and_truncated() {
    let topics = top_topics(
        vec![
            label("Health", 0.2),
            label("Sports", 0.9),
            label("Science", 0.55),
            label("Politics", 0.7),
        ],
        3,
    );

    let labels: Vec<&str> = topics.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Sports", "Politics", "Science"]);
}

#[test]
fn given_long_fraction_when_rounding_then_keeps_three_decimals() {
    assert_eq!(round_score(0.123_456), 0.123);
    assert_eq!(round_score(0.9876), 0.988);
    assert_eq!(round_score(1.2), 1.0);
    assert_eq!(round_score(-0.1), 0.0);
}

#[tokio::test]
async fn given_five_labels_when_classifying_then_returns_exactly_three_rounded_descending() {
    let resources = Resources::new(
        RecordingGenerator::replying(""),
        FixedKeywordExtractor::new(&[]),
        ScriptedClassifier::new(&[0.912_34, 0.456_78, 0.777_77, 0.05, 0.300_01]),
    );
    let strategy = TopicStrategy::new(
        Arc::new(resources.registry()),
        Duration::from_secs(5),
        DEFAULT_TOP_K,
    );

    let result = strategy
        .classify_topic("Hello world, this is a simple English sentence for testing.", Language::English)
        .await
        .unwrap();

    assert_eq!(result.topics.len(), 3);
    assert_eq!(result.topics[0].label, "Technology");
    assert_eq!(result.topics[0].score, 0.912);
    assert_eq!(result.topics[1].label, "Health");
    assert_eq!(result.topics[1].score, 0.778);
    assert_eq!(result.topics[2].label, "Science");
    assert!(result.topics.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(result.topics.iter().all(|t| (0.0..=1.0).contains(&t.score)));
    assert_eq!(resources.classifier.templates(), vec![EN_TEMPLATE]);
}
