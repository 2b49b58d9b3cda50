use crate::schema::{DocumentMetadata, Notification};
use crate::services::{DeliveryError, DocumentLookup, NotificationSink};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup double that answers from a fixed document, or the placeholder when unset.
#[derive(Default)]
pub struct FakeLookup {
    document: Option<DocumentMetadata>,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn returning(title: &str, url: &str, collection_id: Option<&str>) -> Self {
        Self {
            document: Some(DocumentMetadata {
                title: title.to_string(),
                url: url.to_string(),
                collection_id: collection_id.map(ToString::to_string),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocumentLookup for FakeLookup {
    async fn fetch(&self, _document_id: &str) -> DocumentMetadata {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.document.clone().unwrap_or_else(DocumentMetadata::unknown)
    }
}

#[derive(Default)]
pub struct FakeSink {
    reject: bool,
    delivered: Mutex<Vec<Notification>>,
}

impl FakeSink {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationSink for FakeSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(notification.clone());
        if self.reject {
            return Err(DeliveryError::Rejected {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}
