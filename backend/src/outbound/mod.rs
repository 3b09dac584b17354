//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **storage**: snapshot stores (in-memory and file-backed via `cap-std`)
//! - **notification**: dispatchers that hand notification intents onwards
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod notification;
pub mod storage;
