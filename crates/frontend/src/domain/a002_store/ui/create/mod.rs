//! Store create screen.
//!
//! - model.rs: guards and default record
//! - view_model.rs: reactive wrapper around the form controller
//! - view.rs: gate and page components

mod model;
mod view;
mod view_model;

pub use model::{default_record, CREATE_STORE_GUARDS};
pub use view::{StoreCreatePage, StoreCreateRoute};
pub use view_model::StoreCreateViewModel;
