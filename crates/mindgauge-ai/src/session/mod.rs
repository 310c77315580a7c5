//! Conversation session management.
//!
//! A `ChatSession` holds the append-only turn history for one dialogue and
//! replays it verbatim to the model on every call. Dropping an in-flight
//! `send` future abandons the network call; the user turn already appended
//! stays in history, like any other failed send.

mod chat;
mod manager;

pub use manager::ChatSession;
