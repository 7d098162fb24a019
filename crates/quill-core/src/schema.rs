//! Declarative field rules for `Category` and `Post`.
//!
//! One table drives the request validators, the client form check and the
//! access layer's pre-write check, so literal bounds live only here.

/// What shape a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string whose length (in chars, after optional trimming) is bounded.
    Text {
        min_len: usize,
        max_len: Option<usize>,
    },
    /// An identifier of another record.
    Reference,
    /// A sequence of strings with no per-item constraint.
    TextList,
    /// A boolean.
    Flag,
}

/// A single field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key in the JSON body.
    pub field: &'static str,
    /// Human label used in length and type messages.
    pub label: &'static str,
    /// Short name used in the "is required" message.
    pub name: &'static str,
    /// Required on create. Every field is optional on update.
    pub required: bool,
    /// Strip leading and trailing whitespace before checking and storing.
    pub trim: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn required_message(&self) -> String {
        format!("{} is required", self.name)
    }

    pub fn length_message(&self) -> String {
        match self.kind {
            FieldKind::Text {
                min_len,
                max_len: Some(max_len),
            } => format!(
                "{} must be between {} and {} characters",
                self.label, min_len, max_len
            ),
            FieldKind::Text { min_len, .. } => format!(
                "{} must be at least {} characters long",
                self.label, min_len
            ),
            _ => format!("{} has an invalid length", self.label),
        }
    }

    pub fn type_message(&self) -> String {
        match self.kind {
            FieldKind::Text { .. } => format!("{} must be a string", self.label),
            FieldKind::Reference => format!("Invalid {} format", self.label),
            FieldKind::TextList => format!("{} must be an array of strings", self.label),
            FieldKind::Flag => format!("{} must be a boolean", self.label),
        }
    }

    /// Normalize a text value the way this rule stores it.
    pub fn normalize<'a>(&self, value: &'a str) -> &'a str {
        if self.trim { value.trim() } else { value }
    }

    /// Check the length bounds of an already-normalized text value.
    ///
    /// An empty value reports the required message only when `required`;
    /// otherwise it fails the length bound like any other short value.
    pub fn check_len(&self, value: &str, required: bool) -> Result<(), String> {
        let FieldKind::Text { min_len, max_len } = self.kind else {
            return Ok(());
        };

        let len = value.chars().count();
        if len == 0 && required {
            return Err(self.required_message());
        }
        if len < min_len || max_len.is_some_and(|max| len > max) {
            return Err(self.length_message());
        }
        Ok(())
    }
}

/// Post field rules.
pub mod post {
    use super::{FieldKind, FieldRule};

    pub const TITLE: FieldRule = FieldRule {
        field: "title",
        label: "Title",
        name: "Title",
        required: true,
        trim: true,
        kind: FieldKind::Text {
            min_len: 5,
            max_len: Some(100),
        },
    };

    pub const CONTENT: FieldRule = FieldRule {
        field: "content",
        label: "Content",
        name: "Content",
        required: true,
        trim: true,
        kind: FieldKind::Text {
            min_len: 10,
            max_len: None,
        },
    };

    pub const AUTHOR: FieldRule = FieldRule {
        field: "author",
        label: "Author name",
        name: "Author",
        required: true,
        trim: true,
        kind: FieldKind::Text {
            min_len: 3,
            max_len: Some(50),
        },
    };

    pub const CATEGORY: FieldRule = FieldRule {
        field: "category",
        label: "Category ID",
        name: "Category ID",
        required: true,
        trim: true,
        kind: FieldKind::Reference,
    };

    pub const TAGS: FieldRule = FieldRule {
        field: "tags",
        label: "Tags",
        name: "Tags",
        required: false,
        trim: false,
        kind: FieldKind::TextList,
    };

    pub const PUBLISHED: FieldRule = FieldRule {
        field: "published",
        label: "Published",
        name: "Published",
        required: false,
        trim: false,
        kind: FieldKind::Flag,
    };

    pub const ALL: [FieldRule; 6] = [TITLE, CONTENT, AUTHOR, CATEGORY, TAGS, PUBLISHED];
}

/// Category field rules.
pub mod category {
    use super::{FieldKind, FieldRule};

    pub const NAME: FieldRule = FieldRule {
        field: "name",
        label: "Category name",
        name: "Category name",
        required: true,
        trim: true,
        kind: FieldKind::Text {
            min_len: 3,
            max_len: Some(50),
        },
    };
}

/// Rule for path identifiers.
pub const ID: FieldRule = FieldRule {
    field: "id",
    label: "ID",
    name: "ID",
    required: true,
    trim: false,
    kind: FieldKind::Reference,
};
