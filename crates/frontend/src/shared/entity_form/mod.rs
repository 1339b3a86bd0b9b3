//! Entity creation pipeline: validate, resolve relations, submit, navigate.
//!
//! Pure Rust, independent of the view layer. Screens wrap a
//! [`controller::FormController`] and re-render through its observer.

pub mod controller;
pub mod gateway;
pub mod navigation;
pub mod relation;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{FormController, FormMessage, FormPhase, FormSnapshot, SubmitOutcome};
pub use gateway::SubmissionGateway;
pub use navigation::{NavigationEffect, Navigator};
pub use relation::{FetchOutcome, RelationOption, RelationResolver, RelationState};
pub use service::{ApiError, EntityService, HttpEntityService};
