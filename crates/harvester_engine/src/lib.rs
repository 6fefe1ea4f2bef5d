//! Harvester engine: transport, index resolution, bounded harvesting and emission.
mod decode;
mod emit;
mod engine;
mod fetch;
mod harvest;
mod index;
mod persist;
mod settings;
mod types;

pub use decode::{decode_body, DecodeError};
pub use emit::{emit, emit_with, EmitError, EmitFormat};
pub use engine::HarvestEngine;
pub use fetch::{Fetcher, ReqwestFetcher};
pub use harvest::Harvester;
pub use index::{IndexError, IndexResolver};
pub use persist::{write_atomically, PersistError};
pub use settings::{ConfigError, HarvestSettings, OrderPolicy, SiteRoot, DEFAULT_BASE_URL};
pub use types::{FailureKind, FetchError, FetchResult, HarvestError, HarvestOutcome};
