pub mod crud;
pub mod metadata;
pub mod record;
