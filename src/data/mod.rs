#[cfg(feature = "tokio-runtime")]
pub mod poller;
pub mod provider;
pub mod records;

// Re-exports for convenience
pub use provider::{MapDataProvider, RestDataProvider};
pub use records::{
    Base, BaseId, BaseStatus, Continent, ContinentId, FacilityClass, FactionId, LatticeLink,
    NEUTRAL_FACTION,
};
