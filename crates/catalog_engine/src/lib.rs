//! Comic catalog engine: API endpoints, HTTP fetching, and payload decoding.
mod endpoints;
mod engine;
mod fetch;
mod payload;
mod types;

pub use endpoints::{ApiEndpoints, EndpointError};
pub use engine::EngineHandle;
pub use fetch::{DetailLookup, FetchSettings, Fetcher, ReqwestFetcher};
pub use payload::{decode_collection, decode_record, ComicPayload, DecodeError};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
