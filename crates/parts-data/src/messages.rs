//! Contact form submissions.

use std::sync::Arc;

use parts_commerce::content::ContactMessage;

use crate::client::RowApi;
use crate::error::DataError;
use crate::records::{NewContactMessageRecord, CONTACT_MESSAGES};

#[derive(Clone)]
pub struct MessageService {
    api: Arc<dyn RowApi>,
}

impl MessageService {
    pub fn new(api: Arc<dyn RowApi>) -> Self {
        Self { api }
    }

    /// Validate and store a message. Invalid messages are never sent.
    pub async fn submit(&self, message: &ContactMessage) -> Result<(), DataError> {
        message.validate()?;

        let row = serde_json::to_value(NewContactMessageRecord::from(message))?;
        if let Err(e) = self.api.insert(CONTACT_MESSAGES, row).await {
            tracing::error!(error = %e, "Failed to send contact message");
            return Err(e);
        }

        tracing::info!(subject = message.subject.as_deref().unwrap_or(""), "Contact message sent");
        Ok(())
    }
}
