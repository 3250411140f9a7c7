use std::sync::Arc;

use crate::application::ports::CrawlerClient;
use crate::application::services::TranscriptionService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub crawler: Option<Arc<dyn CrawlerClient>>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(
        transcription_service: Arc<TranscriptionService>,
        crawler: Option<Arc<dyn CrawlerClient>>,
        settings: Settings,
    ) -> Self {
        Self {
            transcription_service,
            crawler,
            settings,
        }
    }

    pub fn storage_enabled(&self) -> bool {
        self.transcription_service.archival_enabled()
    }

    pub fn crawler_enabled(&self) -> bool {
        self.crawler.is_some()
    }
}
