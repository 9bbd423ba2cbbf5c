use std::sync::Arc;

use crate::services::analysis_service::AnalysisService;
use crate::services::data_cache::DataCache;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DataCache>,
    pub analysis: Arc<AnalysisService>,
}
