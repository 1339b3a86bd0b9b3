use contracts::shared::record::Record;
use std::rc::Rc;

use super::service::{ApiError, EntityService};

/// Performs the single authorized create call for one collection.
///
/// Never retries; a retry is a new user-initiated submit.
#[derive(Clone)]
pub struct SubmissionGateway {
    service: Rc<dyn EntityService>,
    collection: &'static str,
}

impl SubmissionGateway {
    pub fn new(service: Rc<dyn EntityService>, collection: &'static str) -> Self {
        Self {
            service,
            collection,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Create the record, returning the new entity id
    pub async fn create(&self, record: &Record) -> Result<String, ApiError> {
        log::info!("Creating {} record", self.collection);

        let created = self.service.create(self.collection, record).await?;
        if created.id.trim().is_empty() {
            return Err(ApiError::Decode("response carried an empty id".to_string()));
        }

        log::info!("Created {} {}", self.collection, created.id);
        Ok(created.id)
    }
}
