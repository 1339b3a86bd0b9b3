pub mod api;
pub mod context;
pub mod gate;
pub mod guard;
pub mod storage;

pub use guard::{evaluate, AccessPermit, ActorSession, AuthDecision, Guard};
