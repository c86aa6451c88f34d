use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    GenerationParams, InferenceError, KeywordExtractor, TextGenerator, ZeroShotClassifier,
};
use crate::domain::{CandidateLabelSet, Language, StopwordSet, Task};

/// A summarization resource plus the input convention it expects.
#[derive(Clone)]
pub struct SummarizerBinding {
    pub generator: Arc<dyn TextGenerator>,
    /// Task prefix prepended to every input, e.g. `"summarize: "`.
    pub input_prefix: String,
    pub params: GenerationParams,
}

#[derive(Clone)]
pub struct KeywordBinding {
    pub extractor: Arc<dyn KeywordExtractor>,
    /// When set, candidates are case-folded and filtered against it.
    pub post_filter: Option<Arc<StopwordSet>>,
}

#[derive(Clone)]
pub struct TopicBinding {
    pub classifier: Arc<dyn ZeroShotClassifier>,
    pub labels: Arc<CandidateLabelSet>,
    pub hypothesis_template: String,
    pub multi_label: bool,
}

#[derive(Clone)]
pub enum ModelResource {
    Summarizer(SummarizerBinding),
    Keywords(KeywordBinding),
    Topic(TopicBinding),
}

impl ModelResource {
    pub fn task(&self) -> Task {
        match self {
            Self::Summarizer(_) => Task::Summarize,
            Self::Keywords(_) => Task::Keywords,
            Self::Topic(_) => Task::Topic,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no {task} resource configured for language {language}")]
    MissingResource { task: Task, language: Language },
    #[error("candidate label set is empty")]
    EmptyLabelSet,
}

/// Fixed (task, language) table of inference resources, built once at startup.
///
/// Every task must be bound for every supported language before the registry
/// can be built, so lookups never load anything at request time.
pub struct ModelRegistry {
    resources: HashMap<(Task, Language), ModelResource>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    pub fn resource(&self, task: Task, language: Language) -> Option<&ModelResource> {
        self.resources.get(&(task, language))
    }

    pub fn summarizer(&self, language: Language) -> Result<&SummarizerBinding, InferenceError> {
        match self.resource(Task::Summarize, language) {
            Some(ModelResource::Summarizer(binding)) => Ok(binding),
            _ => Err(InferenceError::ResourceUnavailable {
                task: Task::Summarize,
                language,
            }),
        }
    }

    pub fn keywords(&self, language: Language) -> Result<&KeywordBinding, InferenceError> {
        match self.resource(Task::Keywords, language) {
            Some(ModelResource::Keywords(binding)) => Ok(binding),
            _ => Err(InferenceError::ResourceUnavailable {
                task: Task::Keywords,
                language,
            }),
        }
    }

    pub fn topic(&self, language: Language) -> Result<&TopicBinding, InferenceError> {
        match self.resource(Task::Topic, language) {
            Some(ModelResource::Topic(binding)) => Ok(binding),
            _ => Err(InferenceError::ResourceUnavailable {
                task: Task::Topic,
                language,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[derive(Default)]
pub struct ModelRegistryBuilder {
    resources: HashMap<(Task, Language), ModelResource>,
}

impl ModelRegistryBuilder {
    pub fn summarizer(mut self, language: Language, binding: SummarizerBinding) -> Self {
        self.resources.insert(
            (Task::Summarize, language),
            ModelResource::Summarizer(binding),
        );
        self
    }

    pub fn keywords(mut self, language: Language, binding: KeywordBinding) -> Self {
        self.resources
            .insert((Task::Keywords, language), ModelResource::Keywords(binding));
        self
    }

    pub fn topic(mut self, language: Language, binding: TopicBinding) -> Self {
        self.resources
            .insert((Task::Topic, language), ModelResource::Topic(binding));
        self
    }

    pub fn build(self) -> Result<ModelRegistry, RegistryError> {
        for task in Task::ALL {
            for language in Language::ALL {
                if !self.resources.contains_key(&(task, language)) {
                    return Err(RegistryError::MissingResource { task, language });
                }
            }
        }

        let has_empty_labels = self.resources.values().any(|resource| {
            matches!(resource, ModelResource::Topic(binding) if binding.labels.is_empty())
        });
        if has_empty_labels {
            return Err(RegistryError::EmptyLabelSet);
        }

        Ok(ModelRegistry {
            resources: self.resources,
        })
    }
}
