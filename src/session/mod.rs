//! Session-oriented orchestration API.

/// Deck session: document in, rendered surfaces and archive out.
pub mod deck_session;
