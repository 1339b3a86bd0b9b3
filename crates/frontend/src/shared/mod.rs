pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod entity_form;
pub mod picker_aggregate;
pub mod theme;
