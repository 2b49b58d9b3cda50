use serde::Deserialize;

/// Body Outline posts to the webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub model: serde_json::Value,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    DocumentCreate,
    DocumentDelete,
    DocumentUpdate,
    DocumentTitleChange,
    DocumentPublish,
    DocumentArchive,
    DocumentPermanentDelete,
    RevisionCreate,
    CommentCreate,
    CommentUpdate,
    CommentDelete,
    StarCreate,
    StarDelete,
    PinCreate,
    SubscriptionUpdate,
    TeamUpdate,
    Unsupported(String),
}

impl EventKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "documents.create" => Self::DocumentCreate,
            "documents.delete" => Self::DocumentDelete,
            "documents.update" => Self::DocumentUpdate,
            "documents.title_change" => Self::DocumentTitleChange,
            "documents.publish" => Self::DocumentPublish,
            "documents.archive" => Self::DocumentArchive,
            "documents.permanent_delete" => Self::DocumentPermanentDelete,
            "revisions.create" => Self::RevisionCreate,
            "comments.create" => Self::CommentCreate,
            "comments.update" => Self::CommentUpdate,
            "comments.delete" => Self::CommentDelete,
            "stars.create" => Self::StarCreate,
            "stars.delete" => Self::StarDelete,
            "pins.create" => Self::PinCreate,
            "webhookSubscriptions.update" => Self::SubscriptionUpdate,
            "teams.update" => Self::TeamUpdate,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DocumentCreate => "documents.create",
            Self::DocumentDelete => "documents.delete",
            Self::DocumentUpdate => "documents.update",
            Self::DocumentTitleChange => "documents.title_change",
            Self::DocumentPublish => "documents.publish",
            Self::DocumentArchive => "documents.archive",
            Self::DocumentPermanentDelete => "documents.permanent_delete",
            Self::RevisionCreate => "revisions.create",
            Self::CommentCreate => "comments.create",
            Self::CommentUpdate => "comments.update",
            Self::CommentDelete => "comments.delete",
            Self::StarCreate => "stars.create",
            Self::StarDelete => "stars.delete",
            Self::PinCreate => "pins.create",
            Self::SubscriptionUpdate => "webhookSubscriptions.update",
            Self::TeamUpdate => "teams.update",
            Self::Unsupported(name) => name,
        }
    }

    // the model of a documents.* event is the document itself
    fn model_is_document(&self) -> bool {
        self.as_str().starts_with("documents.")
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub model: serde_json::Value,
    pub id: Option<String>,
}

impl From<WebhookRequest> for Event {
    fn from(request: WebhookRequest) -> Self {
        Self {
            kind: EventKind::parse(&request.event),
            model: request.payload.model,
            id: request.payload.id,
        }
    }
}

impl Event {
    /// Collection id carried directly on the payload, if any.
    pub fn collection_id(&self) -> Option<&str> {
        non_empty(self.model["collectionId"].as_str())
    }

    /// Id of the document this event refers to, if any.
    pub fn document_id(&self) -> Option<&str> {
        non_empty(self.model["documentId"].as_str()).or_else(|| {
            if self.kind.model_is_document() {
                non_empty(self.model["id"].as_str())
            } else {
                None
            }
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: &str, model: serde_json::Value) -> Event {
        Event {
            kind: EventKind::parse(kind),
            model,
            id: None,
        }
    }

    #[test]
    fn parses_known_and_unknown_kinds() {
        assert_eq!(
            EventKind::parse("documents.title_change"),
            EventKind::DocumentTitleChange
        );
        assert_eq!(
            EventKind::parse("webhookSubscriptions.update"),
            EventKind::SubscriptionUpdate
        );
        assert_eq!(
            EventKind::parse("collections.create"),
            EventKind::Unsupported("collections.create".to_string())
        );
        assert_eq!(EventKind::parse("users.signin").as_str(), "users.signin");
    }

    #[test]
    fn decodes_webhook_body() {
        let raw = r#"{"event":"documents.delete","payload":{"id":"evt1","model":{"id":"doc1"}}}"#;
        let request: WebhookRequest = serde_json::from_str(raw).unwrap();
        let event = Event::from(request);
        assert_eq!(event.kind, EventKind::DocumentDelete);
        assert_eq!(event.id.as_deref(), Some("evt1"));
        assert_eq!(event.model["id"], "doc1");
    }

    #[test]
    fn missing_payload_defaults_to_null_model() {
        let request: WebhookRequest = serde_json::from_str(r#"{"event":"teams.update"}"#).unwrap();
        let event = Event::from(request);
        assert!(event.model.is_null());
        assert!(event.document_id().is_none());
    }

    #[test]
    fn document_id_prefers_explicit_reference() {
        let comment = event(
            "comments.create",
            serde_json::json!({ "id": "c1", "documentId": "d1" }),
        );
        assert_eq!(comment.document_id(), Some("d1"));

        let document = event("documents.update", serde_json::json!({ "id": "d2" }));
        assert_eq!(document.document_id(), Some("d2"));

        let team = event("teams.update", serde_json::json!({ "id": "t1" }));
        assert!(team.document_id().is_none());
    }

    #[test]
    fn empty_collection_id_is_absent() {
        let e = event("documents.update", serde_json::json!({ "collectionId": "" }));
        assert!(e.collection_id().is_none());
    }
}
