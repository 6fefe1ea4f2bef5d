use std::sync::Arc;

use engine_logging::{engine_debug, engine_warn};
use harvester_core::{extract_references, IndexSpec, ItemReference, ParseError};

use crate::{Fetcher, SiteRoot};

/// Why a listing produced no references.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("invalid listing url for {path}: {message}")]
    InvalidUrl { path: String, message: String },
    #[error("listing {url} could not be fetched")]
    Fetch { url: String },
    #[error("listing could not be parsed: {0}")]
    Parse(#[from] ParseError),
}

/// Fetches an index page and lists the detail pages it links to.
pub struct IndexResolver {
    fetcher: Arc<dyn Fetcher>,
    site: SiteRoot,
}

impl IndexResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, site: SiteRoot) -> Self {
        Self { fetcher, site }
    }

    /// Any failure yields an empty list; the cause is logged.
    pub async fn resolve(&self, spec: &IndexSpec) -> Vec<ItemReference> {
        match self.try_resolve(spec).await {
            Ok(references) => references,
            Err(err) => {
                engine_warn!("index {} unavailable: {err}", spec.path);
                Vec::new()
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but keeps the reason for an unusable listing.
    ///
    /// A listing that was fetched but links to nothing is `Ok` and empty.
    pub async fn try_resolve(&self, spec: &IndexSpec) -> Result<Vec<ItemReference>, IndexError> {
        let url = self
            .site
            .resolve(&spec.path)
            .map_err(|err| IndexError::InvalidUrl {
                path: spec.path.clone(),
                message: err.to_string(),
            })?;

        let fetched = self.fetcher.fetch(url.as_str()).await;
        if !fetched.ok {
            return Err(IndexError::Fetch {
                url: url.to_string(),
            });
        }

        let references = extract_references(&fetched.body, spec)?;
        engine_debug!("index {} lists {} references", spec.path, references.len());
        Ok(references)
    }
}
