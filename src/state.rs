use company_search::config::AppConfig;
use company_search::store::CompanyStore;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn CompanyStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CompanyStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Minimum trimmed query length / 最短查询长度
    pub fn min_query_length(&self) -> usize {
        self.config.search.min_query_length
    }
}
