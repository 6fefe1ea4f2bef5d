use std::sync::Arc;

use engine_logging::engine_info;
use harvester_core::{IndexSpec, ItemParser, ItemReference};

use crate::index::{IndexError, IndexResolver};
use crate::{Fetcher, HarvestError, HarvestOutcome, HarvestSettings, Harvester, ReqwestFetcher};

/// Index resolver and harvester wired to one shared transport.
pub struct HarvestEngine {
    resolver: IndexResolver,
    harvester: Harvester,
}

impl HarvestEngine {
    /// Builds the HTTP transport from `settings`.
    pub fn new(settings: &HarvestSettings) -> Result<Self, HarvestError> {
        let fetcher = ReqwestFetcher::new(settings).map_err(HarvestError::Client)?;
        Self::with_fetcher(Arc::new(fetcher), settings)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        settings: &HarvestSettings,
    ) -> Result<Self, HarvestError> {
        let harvester = Harvester::new(Arc::clone(&fetcher), settings)?;
        let resolver = IndexResolver::new(fetcher, settings.site.clone());
        Ok(Self {
            resolver,
            harvester,
        })
    }

    pub fn resolver(&self) -> &IndexResolver {
        &self.resolver
    }

    pub fn harvester(&self) -> &Harvester {
        &self.harvester
    }

    /// Resolve the listing, then harvest every reference on it.
    ///
    /// An unavailable listing yields an empty outcome.
    pub async fn run(&self, index: &IndexSpec, parser: Arc<dyn ItemParser>) -> HarvestOutcome {
        let references = self.resolver.resolve(index).await;
        self.harvest_listed(index, references, parser).await
    }

    /// Like [`run`](Self::run), but an unavailable listing is an error.
    pub async fn run_strict(
        &self,
        index: &IndexSpec,
        parser: Arc<dyn ItemParser>,
    ) -> Result<HarvestOutcome, IndexError> {
        let references = self.resolver.try_resolve(index).await?;
        Ok(self.harvest_listed(index, references, parser).await)
    }

    async fn harvest_listed(
        &self,
        index: &IndexSpec,
        references: Vec<ItemReference>,
        parser: Arc<dyn ItemParser>,
    ) -> HarvestOutcome {
        engine_info!(
            "found {} references on {}, harvesting with concurrency {}",
            references.len(),
            index.path,
            self.harvester.concurrency_limit()
        );
        if references.is_empty() {
            return HarvestOutcome::empty();
        }
        self.harvester.harvest(references, parser).await
    }
}
