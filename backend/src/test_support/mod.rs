//! Shared test doubles for domain service tests.

mod clock;
mod store;

pub use clock::MutableClock;
pub use store::ToggleStore;
