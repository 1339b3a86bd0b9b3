pub mod field_input;
pub mod page_header;
pub mod pagination_controls;

pub use field_input::FieldInput;
pub use page_header::{Breadcrumb, PageHeader};
pub use pagination_controls::PaginationControls;
