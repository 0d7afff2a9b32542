use std::sync::Arc;
use tracing::{error, info};

use crate::modules::registration::core::schedule_cache::{CatalogSnapshot, ScheduleCache};
use crate::modules::registration::use_cases::load_offerings::source_port::OfferingSource;

pub const LOAD_FAILURE_MESSAGE: &str =
    "Could not load the registration data. Please refresh the page.";

pub struct LoadOfferingsHandler {
    source: Arc<dyn OfferingSource>,
}

impl LoadOfferingsHandler {
    pub fn new(source: Arc<dyn OfferingSource>) -> Self {
        Self { source }
    }

    /// Runs the four fetches together; any failure fails the whole snapshot.
    pub async fn fetch(&self) -> anyhow::Result<CatalogSnapshot> {
        let (offerings, teachers, materials, centers) = tokio::try_join!(
            self.source.active_offerings(),
            self.source.teachers(),
            self.source.active_materials(),
            self.source.active_centers(),
        )?;
        Ok(CatalogSnapshot {
            offerings,
            teachers,
            materials,
            centers,
        })
    }

    pub async fn handle(&self, cache: &mut ScheduleCache) -> anyhow::Result<()> {
        match self.fetch().await {
            Ok(snapshot) => {
                info!(
                    offerings = snapshot.offerings.len(),
                    centers = snapshot.centers.len(),
                    "schedule cache loaded"
                );
                cache.replace(snapshot);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "schedule cache load failed");
                cache.fail(LOAD_FAILURE_MESSAGE);
                Err(err)
            }
        }
    }
}
