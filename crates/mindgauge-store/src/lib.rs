//! Durable storage for mindgauge.
//!
//! Plain file-backed implementations of the storage seams the dialogue
//! engine consumes: a TOML credentials file behind `CredentialStore` and a
//! JSON results journal behind `ResultSink`.

pub mod credentials;
pub mod results;

pub use credentials::FileCredentialStore;
pub use results::{JsonResultStore, StoredResult};
