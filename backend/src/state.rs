use crate::{config::Config, services::occupancy::OccupancyService};

#[derive(Clone)]
pub struct AppState {
    pub occupancy: OccupancyService,
    pub config: Config,
}

impl AppState {
    pub fn new(occupancy: OccupancyService, config: Config) -> Self {
        Self { occupancy, config }
    }
}
