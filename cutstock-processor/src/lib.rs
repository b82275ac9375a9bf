//! Request processor of the cutstock engine.
//!
//! Reads request envelopes (one JSON document per line), dispatches them to the
//! `/cut/*` solvers or the `/cutRecord/*` record store and emits one response
//! envelope per request.

pub mod envelope;
pub mod processor;
pub mod record;

#[doc(inline)]
pub use envelope::{ErrorKind, RequestEnvelope, ResponseEnvelope};
#[doc(inline)]
pub use processor::CutProcessor;
#[doc(inline)]
pub use record::{MemoryRecordStore, RecordStore};
