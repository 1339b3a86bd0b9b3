pub mod aggregate;

/// Generated from metadata.json by build.rs
pub mod metadata {
    include!(concat!(env!("OUT_DIR"), "/a001_supplier_metadata.rs"));
}
