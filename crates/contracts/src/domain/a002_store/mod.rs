pub mod aggregate;

/// Generated from metadata.json by build.rs
pub mod metadata {
    include!(concat!(env!("OUT_DIR"), "/a002_store_metadata.rs"));
}
