//! Service wiring: the store handle and the prediction runner.

use std::sync::Arc;

use stratboard_ai::{HttpInferenceClient, InferenceClient, PredictionRunner};
use stratboard_dashboard::DashboardAggregator;
use stratboard_export::Exporter;
use stratboard_infra::{InMemoryStrategyStore, PostgresStrategyStore, StrategyStore};

use crate::config::{AppConfig, StoreBackend};

pub type SharedStore = Arc<dyn StrategyStore>;
pub type SharedInference = Arc<dyn InferenceClient>;

/// Everything request handlers need; cloned per request through `Arc`.
pub struct AppServices {
    store: SharedStore,
    predictions: PredictionRunner<SharedInference, SharedStore>,
}

impl AppServices {
    pub fn new(store: SharedStore, inference: SharedInference) -> Self {
        Self {
            predictions: PredictionRunner::new(inference, Arc::clone(&store)),
            store,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn dashboards(&self) -> DashboardAggregator<SharedStore> {
        DashboardAggregator::new(Arc::clone(&self.store))
    }

    pub fn exporter(&self) -> Exporter<SharedStore> {
        Exporter::new(Arc::clone(&self.store))
    }

    pub fn predictions(&self) -> &PredictionRunner<SharedInference, SharedStore> {
        &self.predictions
    }
}

/// Build services from configuration.
///
/// The in-memory backend is seeded with the demo plan so a fresh process has
/// something to show.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store: SharedStore = match &config.store {
        StoreBackend::InMemory => {
            let store = InMemoryStrategyStore::new();
            stratboard_infra::seed::seed_demo_plan(&store, chrono::Utc::now())?;
            tracing::info!("using in-memory strategy store");
            Arc::new(store)
        }
        StoreBackend::Postgres { database_url } => {
            let store = PostgresStrategyStore::connect(database_url).await?;
            tracing::info!("using postgres strategy store");
            Arc::new(store)
        }
    };

    let inference = HttpInferenceClient::new(config.inference_url.clone(), config.inference_timeout)?;
    tracing::info!(endpoint = inference.endpoint(), "inference client ready");
    Ok(AppServices::new(store, Arc::new(inference)))
}
