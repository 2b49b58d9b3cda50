use serde::{Deserialize, Serialize, Serializer};

pub const UNKNOWN_DOCUMENT_TITLE: &str = "Unknown Document";
pub const UNKNOWN_DOCUMENT_URL: &str = "#";

/// Document details looked up from Outline to enrich an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_url")]
    pub url: String,
    #[serde(default)]
    pub collection_id: Option<String>,
}

impl DocumentMetadata {
    pub fn unknown() -> Self {
        Self {
            title: unknown_title(),
            url: unknown_url(),
            collection_id: None,
        }
    }
}

fn unknown_title() -> String {
    UNKNOWN_DOCUMENT_TITLE.to_string()
}

fn unknown_url() -> String {
    UNKNOWN_DOCUMENT_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// A Discord embed. Serializes to the shape the webhook API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(serialize_with = "serialize_footer")]
    pub footer: String,
}

impl Notification {
    pub fn new(title: &str, color: u32) -> Self {
        Self {
            title: title.to_string(),
            color,
            fields: Vec::new(),
            footer: String::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = text.into();
        self
    }

    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

fn serialize_footer<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Footer<'a> {
        text: &'a str,
    }
    Footer { text }.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_discord_embed() {
        let embed = Notification::new("👥 Team Updated", 0xffa500)
            .field("Name", "Acme")
            .footer("Team ID: t1");
        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "👥 Team Updated",
                "color": 0xffa500,
                "fields": [{ "name": "Name", "value": "Acme" }],
                "footer": { "text": "Team ID: t1" },
            })
        );
    }

    #[test]
    fn metadata_defaults_missing_fields_to_placeholders() {
        let meta: DocumentMetadata =
            serde_json::from_value(serde_json::json!({ "collectionId": "col1" })).unwrap();
        assert_eq!(meta.title, UNKNOWN_DOCUMENT_TITLE);
        assert_eq!(meta.url, UNKNOWN_DOCUMENT_URL);
        assert_eq!(meta.collection_id.as_deref(), Some("col1"));
    }
}
