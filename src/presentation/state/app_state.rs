use std::sync::Arc;

use crate::application::ports::{DocumentExtractor, LanguageDetector};
use crate::application::services::RequestPipeline;
use crate::presentation::config::Settings;

pub struct AppState<E, D>
where
    E: DocumentExtractor,
    D: LanguageDetector,
{
    pub pipeline: Arc<RequestPipeline<E, D>>,
    pub settings: Settings,
}

impl<E, D> Clone for AppState<E, D>
where
    E: DocumentExtractor,
    D: LanguageDetector,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            settings: self.settings.clone(),
        }
    }
}
