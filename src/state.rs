use crate::{
    config::AppConfig,
    services::{planner::PlanService, storage::StorageService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub planner: PlanService,
}

impl AppState {
    pub fn new(config: AppConfig, storage: StorageService, planner: PlanService) -> Self {
        Self {
            config,
            storage,
            planner,
        }
    }
}
