//! Relation select: picks one entity of a related collection.
//!
//! ```rust,ignore
//! view! {
//!     <RelationSelect
//!         resolver=vm.suppliers
//!         version=vm.version
//!         label="Select Supplier"
//!         selected=Signal::derive(move || vm.reference("supplier_id"))
//!         on_select=Callback::new(move |id| vm.select_reference("supplier_id", id))
//!     />
//! }
//! ```

pub mod component;
pub mod traits;

pub use component::RelationSelect;
pub use traits::AggregatePickerResult;
