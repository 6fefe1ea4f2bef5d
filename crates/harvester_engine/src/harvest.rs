//! Bounded fetch+parse over a list of references.
//!
//! Every reference becomes one task on the runtime. Tasks share a counting
//! semaphore; a task holds its permit for exactly one fetch+parse unit and the
//! permit is released when the task ends, whichever way it ends. Failed items
//! are logged and left out of the outcome, they never fail the harvest.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use harvester_core::{ItemParser, ItemReference, Record};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

use crate::{Fetcher, HarvestError, HarvestOutcome, HarvestSettings, OrderPolicy, SiteRoot};

pub struct Harvester {
    fetcher: Arc<dyn Fetcher>,
    site: SiteRoot,
    concurrency_limit: usize,
    budget: Option<Duration>,
    order: OrderPolicy,
}

impl Harvester {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: &HarvestSettings) -> Result<Self, HarvestError> {
        let requested = settings.concurrency_limit;
        if requested == 0 || requested > Semaphore::MAX_PERMITS {
            return Err(HarvestError::InvalidConcurrency {
                requested,
                max: Semaphore::MAX_PERMITS,
            });
        }

        Ok(Self {
            fetcher,
            site: settings.site.clone(),
            concurrency_limit: requested,
            budget: settings.harvest_budget,
            order: settings.order,
        })
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Must be called from within a tokio runtime.
    pub async fn harvest(
        &self,
        references: Vec<ItemReference>,
        parser: Arc<dyn ItemParser>,
    ) -> HarvestOutcome {
        let attempted = references.len();
        let gate = Arc::new(Semaphore::new(self.concurrency_limit));
        let deadline = self.budget.map(|budget| Instant::now() + budget);

        let mut tasks = JoinSet::new();
        for (position, reference) in references.into_iter().enumerate() {
            let gate = Arc::clone(&gate);
            let fetcher = Arc::clone(&self.fetcher);
            let parser = Arc::clone(&parser);
            let site = self.site.clone();
            tasks.spawn(async move {
                let url = match site.resolve(&reference.id) {
                    Ok(url) => url,
                    Err(err) => {
                        engine_error!("unresolvable reference id={}: {err}", reference.id);
                        return None;
                    }
                };
                // Closed only if the semaphore is closed, which never happens here.
                let _permit = gate.acquire_owned().await.ok()?;
                harvest_one(fetcher.as_ref(), parser.as_ref(), &reference, url.as_str())
                    .await
                    .map(|record| (position, record))
            });
        }

        let mut collected: Vec<(usize, Record)> = Vec::with_capacity(attempted);
        loop {
            let joined = match deadline {
                Some(deadline) => {
                    let waited = timeout_at(deadline, tasks.join_next()).await;
                    let Ok(joined) = waited else {
                        engine_warn!(
                            "harvest budget exhausted, abandoning {} unfinished items",
                            tasks.len()
                        );
                        tasks.abort_all();
                        break;
                    };
                    joined
                }
                None => tasks.join_next().await,
            };
            let Some(joined) = joined else {
                break;
            };
            match joined {
                Ok(Some(item)) => collected.push(item),
                Ok(None) => {}
                Err(err) => engine_error!("item task ended abnormally: {err}"),
            }
        }

        if self.order == OrderPolicy::Input {
            collected.sort_by_key(|(position, _)| *position);
        }
        let records = collected.into_iter().map(|(_, record)| record).collect();
        let outcome = HarvestOutcome::new(records, attempted);
        engine_info!(
            "harvested {}/{} items ({} failed)",
            outcome.succeeded(),
            outcome.attempted(),
            outcome.failed()
        );
        outcome
    }
}

async fn harvest_one(
    fetcher: &dyn Fetcher,
    parser: &dyn ItemParser,
    reference: &ItemReference,
    url: &str,
) -> Option<Record> {
    let fetched = fetcher.fetch(url).await;
    if !fetched.ok {
        return None;
    }

    // Parsers are synchronous; a panic inside one counts as a failed item.
    let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
        parser.parse(&fetched.body, &reference.id, &reference.display_name)
    }));

    match parsed {
        Ok(Ok(Some(record))) => {
            engine_debug!("parsed id={} name={}", reference.id, reference.display_name);
            Some(record.with_missing_fields(&reference.extras))
        }
        Ok(Ok(None)) => {
            engine_debug!("no data id={} name={}", reference.id, reference.display_name);
            None
        }
        Ok(Err(err)) => {
            engine_error!(
                "parse failed id={} name={}: {err}",
                reference.id,
                reference.display_name
            );
            None
        }
        Err(_) => {
            engine_error!(
                "parser panicked id={} name={}",
                reference.id,
                reference.display_name
            );
            None
        }
    }
}
