use std::sync::Arc;

use crate::config::Config;
use crate::contract::service::GenerationSettings;
use crate::layout::{LayoutError, PageGeometry, DEFAULT_WRAP_WIDTH};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Geometry, template version and line breaker used for every contract.
    pub settings: GenerationSettings,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LayoutError> {
        let geometry = PageGeometry::A4;
        geometry.validate()?;

        let settings = GenerationSettings {
            geometry,
            template: config.template_version,
            breaker: Arc::from(config.wrap_strategy.breaker(DEFAULT_WRAP_WIDTH)),
        };

        Ok(AppState { config, settings })
    }
}
