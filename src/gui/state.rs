use time::Date;

use crate::{config::DashboardConfig, data::PageKind};

#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    pub today: Date,
    /// The page the sidebar points at, even while it is still loading.
    pub current_page: Option<PageKind>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let today = config.today();
        Self {
            config,
            today,
            current_page: None,
        }
    }
}
