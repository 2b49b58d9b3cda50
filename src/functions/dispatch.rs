use crate::config::Config;
use crate::functions::filter::CollectionFilter;
use crate::functions::rules::{RuleInput, rule_for};
use crate::schema::{DocumentMetadata, Event, Notification};
use crate::services::{DeliveryError, DocumentLookup, NotificationSink};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event's collection is not allow-listed, or could not be resolved.
    CollectionExcluded { collection_id: Option<String> },
    Unsupported(String),
}

#[derive(Debug)]
pub enum Dispatch {
    Notify(Notification),
    Skip(SkipReason),
}

#[derive(Debug)]
pub enum Outcome {
    Delivered,
    Skipped(SkipReason),
    Failed(DeliveryError),
}

/// Turns events into notifications. Holds no per-event state.
pub struct Dispatcher {
    lookup: Arc<dyn DocumentLookup>,
    filter: CollectionFilter,
    outline_url: String,
    timezone: chrono_tz::Tz,
}

impl Dispatcher {
    pub fn new(config: &Config, lookup: Arc<dyn DocumentLookup>) -> Self {
        Self {
            lookup,
            filter: CollectionFilter::new(config.include_collections.iter().cloned()),
            outline_url: config.outline_url.clone(),
            timezone: config.timezone,
        }
    }

    pub async fn dispatch(&self, event: &Event, received_at: DateTime<Utc>) -> Dispatch {
        // metadata fetched while filtering is reused by the rule
        let mut document: Option<DocumentMetadata> = None;

        if self.filter.is_active() {
            let collection_id = match (event.collection_id(), event.document_id()) {
                (Some(id), _) => Some(id.to_string()),
                (None, Some(document_id)) => {
                    let fetched = self.lookup.fetch(document_id).await;
                    let collection_id = fetched.collection_id.clone();
                    document = Some(fetched);
                    collection_id
                }
                (None, None) => None,
            };

            if !self.filter.is_allowed(collection_id.as_deref()) {
                return Dispatch::Skip(SkipReason::CollectionExcluded { collection_id });
            }
        }

        let Some(rule) = rule_for(&event.kind) else {
            return Dispatch::Skip(SkipReason::Unsupported(event.kind.as_str().to_string()));
        };

        if rule.enrich && document.is_none() {
            document = Some(match event.model["documentId"].as_str() {
                Some(document_id) if !document_id.is_empty() => {
                    self.lookup.fetch(document_id).await
                }
                _ => DocumentMetadata::unknown(),
            });
        }

        let notification = rule.build(&RuleInput {
            model: &event.model,
            event_id: event.id.as_deref(),
            document: document.as_ref(),
            outline_url: &self.outline_url,
            timezone: self.timezone,
            received_at,
        });
        Dispatch::Notify(notification)
    }
}

/// Dispatches an event and forwards the result to the sink.
pub struct Relay {
    dispatcher: Dispatcher,
    sink: Arc<dyn NotificationSink>,
}

impl Relay {
    pub fn new(dispatcher: Dispatcher, sink: Arc<dyn NotificationSink>) -> Self {
        Self { dispatcher, sink }
    }

    pub async fn handle(&self, event: &Event) -> Outcome {
        match self.dispatcher.dispatch(event, Utc::now()).await {
            Dispatch::Skip(reason) => Outcome::Skipped(reason),
            Dispatch::Notify(notification) => match self.sink.deliver(&notification).await {
                Ok(()) => Outcome::Delivered,
                Err(e) => Outcome::Failed(e),
            },
        }
    }
}
