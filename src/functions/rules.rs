use crate::schema::{DocumentMetadata, EventKind, Notification, UNKNOWN_DOCUMENT_URL};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const RED: u32 = 0xff0000;
const YELLOW: u32 = 0xffff00;
const GREEN: u32 = 0x00ff00;
const CYAN: u32 = 0x00ffff;
const ORANGE: u32 = 0xffa500;
const GOLD: u32 = 0xffd700;
const GRAY: u32 = 0x808080;
const DODGER_BLUE: u32 = 0x1e90ff;
const LIME_GREEN: u32 = 0x32cd32;
const CRIMSON: u32 = 0xdc143c;

const INVALID_DATE: &str = "Invalid Date";
// Discord rejects embed fields with an empty value
const NO_COMMENT_TEXT: &str = "(no text)";
const NO_EVENTS: &str = "None";

/// Everything a rule may read. Rules are pure functions of this.
pub struct RuleInput<'a> {
    pub model: &'a serde_json::Value,
    pub event_id: Option<&'a str>,
    pub document: Option<&'a DocumentMetadata>,
    pub outline_url: &'a str,
    pub timezone: Tz,
    pub received_at: DateTime<Utc>,
}

impl RuleInput<'_> {
    fn text(&self, key: &str) -> Option<&str> {
        self.model[key].as_str()
    }

    fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    fn title(&self) -> String {
        self.text_or("title", "Untitled")
    }

    fn actor(&self, key: &str) -> String {
        self.model[key]["name"]
            .as_str()
            .unwrap_or("Unknown")
            .to_string()
    }

    fn id(&self) -> String {
        self.text_or("id", "unknown")
    }

    fn timestamp(&self, key: &str) -> String {
        format_timestamp(self.text(key), self.timezone)
    }

    fn received(&self) -> String {
        render_instant(self.received_at, self.timezone)
    }

    fn target_type(&self) -> &'static str {
        if self.text("documentId").is_some_and(|v| !v.is_empty()) {
            "Document"
        } else {
            "Collection"
        }
    }

    fn document_title(&self) -> String {
        self.document
            .map(|d| d.title.clone())
            .unwrap_or_else(|| DocumentMetadata::unknown().title)
    }

    fn document_link(&self) -> String {
        let url = self
            .document
            .map(|d| d.url.as_str())
            .unwrap_or(UNKNOWN_DOCUMENT_URL);
        format!("{}{}", self.outline_url, url)
    }
}

/// Renders an ISO-8601 timestamp the way `Date#toLocaleString` does in en-US.
pub fn format_timestamp(raw: Option<&str>, timezone: Tz) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|at| render_instant(at.with_timezone(&Utc), timezone))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn render_instant(at: DateTime<Utc>, timezone: Tz) -> String {
    at.with_timezone(&timezone)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// First text run of a ProseMirror comment body (`content[0].content[0].text`).
pub fn comment_text(data: &serde_json::Value) -> String {
    data.get("content")
        .and_then(|c| c.get(0))
        .and_then(|paragraph| paragraph.get("content"))
        .and_then(|c| c.get(0))
        .and_then(|run| run.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string()
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

/// How one event kind becomes a notification.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Whether the rule needs the referenced document's metadata.
    pub enrich: bool,
    build: fn(&RuleInput<'_>) -> Notification,
}

impl Rule {
    const fn plain(build: fn(&RuleInput<'_>) -> Notification) -> Self {
        Self {
            enrich: false,
            build,
        }
    }

    const fn enriched(build: fn(&RuleInput<'_>) -> Notification) -> Self {
        Self {
            enrich: true,
            build,
        }
    }

    pub fn build(&self, input: &RuleInput<'_>) -> Notification {
        (self.build)(input)
    }
}

pub fn rule_for(kind: &EventKind) -> Option<Rule> {
    let rule = match kind {
        EventKind::DocumentDelete => Rule::plain(document_deleted),
        EventKind::DocumentPermanentDelete => Rule::plain(document_permanently_deleted),
        EventKind::RevisionCreate => Rule::plain(revision_created),
        EventKind::DocumentUpdate => Rule::plain(document_updated),
        EventKind::SubscriptionUpdate => Rule::plain(subscription_updated),
        EventKind::TeamUpdate => Rule::plain(team_updated),
        EventKind::DocumentCreate => Rule::plain(document_created),
        EventKind::StarCreate => Rule::plain(star_created),
        EventKind::StarDelete => Rule::plain(star_deleted),
        EventKind::DocumentTitleChange => Rule::plain(title_changed),
        EventKind::DocumentPublish => Rule::plain(document_published),
        EventKind::PinCreate => Rule::plain(pin_created),
        EventKind::DocumentArchive => Rule::plain(document_archived),
        EventKind::CommentCreate => Rule::enriched(comment_created),
        EventKind::CommentUpdate => Rule::enriched(comment_updated),
        EventKind::CommentDelete => Rule::enriched(comment_deleted),
        EventKind::Unsupported(_) => return None,
    };
    Some(rule)
}

fn document_deleted(input: &RuleInput<'_>) -> Notification {
    Notification::new("📄 Document Deleted", RED)
        .field("Title", input.title())
        .field("Deleted By", input.actor("updatedBy"))
        .field("Deleted At", input.timestamp("deletedAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn document_permanently_deleted(input: &RuleInput<'_>) -> Notification {
    Notification::new("🗑️ Document Permanently Deleted", RED)
        .field("Event ID", input.event_id.unwrap_or("unknown"))
        .footer("This document has been permanently removed and cannot be recovered.")
}

fn revision_created(input: &RuleInput<'_>) -> Notification {
    Notification::new("📝 Document Revised", YELLOW)
        .field("Title", input.title())
        .field("Revised By", input.actor("createdBy"))
        .field("Revised At", input.timestamp("createdAt"))
        .footer(format!(
            "Document ID: {}",
            input.text_or("documentId", "unknown")
        ))
}

fn document_updated(input: &RuleInput<'_>) -> Notification {
    Notification::new("🔄 Document Updated", GREEN)
        .field("Title", input.title())
        .field("Updated By", input.actor("updatedBy"))
        .field("Updated At", input.timestamp("updatedAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn subscription_updated(input: &RuleInput<'_>) -> Notification {
    let events = input.model["events"]
        .as_array()
        .map(|events| {
            events
                .iter()
                .filter_map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    let enabled = if input.model["enabled"].as_bool().unwrap_or(false) {
        "Yes"
    } else {
        "No"
    };

    Notification::new("🔗 Webhook Subscription Updated", CYAN)
        .field("Name", input.text_or("name", "N/A"))
        .field("URL", input.text_or("url", "N/A"))
        .field("Events", or_placeholder(events, NO_EVENTS))
        .field("Enabled", enabled)
        .field("Updated At", input.timestamp("updatedAt"))
        .footer(format!("Subscription ID: {}", input.id()))
}

fn team_updated(input: &RuleInput<'_>) -> Notification {
    Notification::new("👥 Team Updated", ORANGE)
        .field("Name", input.text_or("name", "N/A"))
        .field("URL", input.text_or("url", "N/A"))
        .footer(format!("Team ID: {}", input.id()))
}

fn document_created(input: &RuleInput<'_>) -> Notification {
    Notification::new("📄 New Document Created", GREEN)
        .field("Title", input.title())
        .field("Created By", input.actor("createdBy"))
        .field("Created At", input.timestamp("createdAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn star_created(input: &RuleInput<'_>) -> Notification {
    Notification::new("⭐ Item Starred", GOLD)
        .field("Type", input.target_type())
        .field("Starred At", input.timestamp("createdAt"))
        .footer(format!("Star ID: {}", input.id()))
}

fn star_deleted(input: &RuleInput<'_>) -> Notification {
    // deletion payloads carry no timestamp of their own
    let star_id = input
        .text("id")
        .or(input.event_id)
        .unwrap_or("unknown");
    Notification::new("🚫 Star Removed", GRAY)
        .field("Type", input.target_type())
        .field("Removed At", input.received())
        .footer(format!("Star ID: {star_id}"))
}

fn title_changed(input: &RuleInput<'_>) -> Notification {
    Notification::new("✏️ Document Title Changed", DODGER_BLUE)
        .field("New Title", input.title())
        .field("Changed By", input.actor("updatedBy"))
        .field("Changed At", input.timestamp("updatedAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn document_published(input: &RuleInput<'_>) -> Notification {
    Notification::new("🌐 Document Published", LIME_GREEN)
        .field("Title", input.title())
        .field("Published By", input.actor("updatedBy"))
        .field("Published At", input.timestamp("publishedAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn pin_created(input: &RuleInput<'_>) -> Notification {
    Notification::new("📌 Item Pinned", CRIMSON)
        .field("Type", input.target_type())
        .field("Pinned At", input.timestamp("createdAt"))
        .footer(format!("Pin ID: {}", input.id()))
}

fn document_archived(input: &RuleInput<'_>) -> Notification {
    Notification::new("🗄️ Document Archived", GRAY)
        .field("Title", input.title())
        .field("Archived By", input.actor("updatedBy"))
        .field("Archived At", input.timestamp("archivedAt"))
        .footer(format!("Document ID: {}", input.id()))
}

fn comment_created(input: &RuleInput<'_>) -> Notification {
    Notification::new("💬 New Comment", DODGER_BLUE)
        .field(
            "Comment",
            or_placeholder(comment_text(&input.model["data"]), NO_COMMENT_TEXT),
        )
        .field("Commented By", input.actor("createdBy"))
        .field("Document Title", input.document_title())
        .field("Document Link", input.document_link())
        .footer(format!(
            "Comment ID: {} - Created At: {}",
            input.id(),
            input.timestamp("createdAt")
        ))
}

fn comment_updated(input: &RuleInput<'_>) -> Notification {
    Notification::new("✏️ Comment Updated", DODGER_BLUE)
        .field(
            "Updated Comment",
            or_placeholder(comment_text(&input.model["data"]), NO_COMMENT_TEXT),
        )
        .field("Updated By", input.actor("createdBy"))
        .field("Document Title", input.document_title())
        .field("Document Link", input.document_link())
        .footer(format!(
            "Comment ID: {} - Updated At: {}",
            input.id(),
            input.timestamp("updatedAt")
        ))
}

fn comment_deleted(input: &RuleInput<'_>) -> Notification {
    Notification::new("🗑️ Comment Deleted", RED)
        .field("Deleted By", input.actor("createdBy"))
        .field("Document Title", input.document_title())
        .field("Document Link", input.document_link())
        .footer(format!(
            "Comment ID: {} - Deleted At: {}",
            input.id(),
            input.received()
        ))
}
