pub mod eligibility;
pub mod mru;
pub mod scope;
pub use eligibility::EligibilityPolicy;
pub use mru::MruStore;
pub use scope::ScopeId;
