//! Attachment kinds and the `label|text` composite

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

/// Whole key space reserved for attachments
pub const ATTACHMENT_KEYS: RangeInclusive<i32> = 1000..=1999;

/// Separator between an attachment's label and its text
pub const LABEL_DELIMITER: char = '|';

/// Category of labeled text attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Phone,
    Email,
    Url,
    Photo,
    Video,
    Audio,
    Other,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 7] = [
        AttachmentKind::Phone,
        AttachmentKind::Email,
        AttachmentKind::Url,
        AttachmentKind::Photo,
        AttachmentKind::Video,
        AttachmentKind::Audio,
        AttachmentKind::Other,
    ];

    /// Keys owned by this kind. 1600..=1799 is reserved but unassigned.
    pub const fn keys(self) -> RangeInclusive<i32> {
        match self {
            AttachmentKind::Phone => 1000..=1099,
            AttachmentKind::Email => 1100..=1199,
            AttachmentKind::Url => 1200..=1299,
            AttachmentKind::Photo => 1300..=1399,
            AttachmentKind::Video => 1400..=1499,
            AttachmentKind::Audio => 1500..=1599,
            AttachmentKind::Other => 1800..=1999,
        }
    }

    /// Number of slots in this kind's range
    pub fn capacity(self) -> usize {
        let keys = self.keys();
        (keys.end() - keys.start() + 1) as usize
    }

    /// Kind owning `key`, if any
    pub fn for_key(key: i32) -> Option<AttachmentKind> {
        Self::ALL.into_iter().find(|kind| kind.keys().contains(&key))
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttachmentKind::Phone => "phone",
            AttachmentKind::Email => "email",
            AttachmentKind::Url => "url",
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::Audio => "audio",
            AttachmentKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Labeled attachment value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Optional label, empty when absent
    pub label: String,
    pub text: String,
}

impl Attachment {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Stored form: `label|text`, or just `text` without a label.
    ///
    /// Unlabeled text containing the delimiter keeps a leading `|` so it
    /// parses back with an empty label.
    pub fn compose(label: &str, text: &str) -> String {
        if !label.is_empty() || text.contains(LABEL_DELIMITER) {
            format!("{label}{LABEL_DELIMITER}{text}")
        } else {
            text.to_string()
        }
    }

    /// Split a stored composite at the first delimiter
    pub fn parse(stored: &str) -> Self {
        match stored.split_once(LABEL_DELIMITER) {
            Some((label, text)) => Self::new(label, text),
            None => Self::new("", stored),
        }
    }

    pub fn composite(&self) -> String {
        Self::compose(&self.label, &self.text)
    }
}
