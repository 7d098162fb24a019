//! Request validation.
//!
//! Validators work on the raw JSON body so that a wrong type is reported
//! against its field instead of failing the whole parse. On success they
//! return typed input with whitespace trimmed where the rule asks for it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{Category, NewCategory, NewPost, Post, PostPatch};
use crate::schema::{self, FieldKind, FieldRule};

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every violation found in one request, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.0.iter().any(|e| e.field == field) {
            return;
        }
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combine with another result set, keeping the first message per field.
    pub fn merge(mut self, other: ValidationErrors) -> Self {
        for error in other.0 {
            self.push(error.field, error.message);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";
const TAG_NOT_STRING: &str = "Each tag must be a string";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

struct Checker<'a> {
    body: &'a Map<String, Value>,
    mode: Mode,
    errors: ValidationErrors,
}

impl<'a> Checker<'a> {
    fn new(body: &'a Value, mode: Mode) -> Result<Self, ValidationErrors> {
        let body = body
            .as_object()
            .ok_or_else(|| ValidationErrors::single("body", BODY_NOT_OBJECT))?;
        Ok(Self {
            body,
            mode,
            errors: ValidationErrors::default(),
        })
    }

    fn required(&self, rule: &FieldRule) -> bool {
        self.mode == Mode::Create && rule.required
    }

    fn raw(&mut self, rule: &FieldRule) -> Option<&'a Value> {
        let value = self.body.get(rule.field);
        if value.is_none() && self.required(rule) {
            self.errors.push(rule.field, rule.required_message());
        }
        value
    }

    fn text(&mut self, rule: &FieldRule) -> Option<String> {
        debug_assert!(matches!(rule.kind, FieldKind::Text { .. }));
        let raw = self.raw(rule)?;
        let Some(value) = raw.as_str() else {
            self.errors.push(rule.field, rule.type_message());
            return None;
        };

        let value = rule.normalize(value);
        match rule.check_len(value, self.required(rule)) {
            Ok(()) => Some(value.to_string()),
            Err(message) => {
                self.errors.push(rule.field, message);
                None
            }
        }
    }

    fn reference(&mut self, rule: &FieldRule) -> Option<Uuid> {
        let raw = self.raw(rule)?;
        match raw.as_str().map(|s| rule.normalize(s)) {
            Some("") if self.required(rule) => {
                self.errors.push(rule.field, rule.required_message());
                None
            }
            Some(value) => match parse_uuid(value) {
                Some(id) => Some(id),
                None => {
                    self.errors.push(rule.field, rule.type_message());
                    None
                }
            },
            None => {
                self.errors.push(rule.field, rule.type_message());
                None
            }
        }
    }

    fn text_list(&mut self, rule: &FieldRule) -> Option<Vec<String>> {
        let raw = self.raw(rule)?;
        let Some(items) = raw.as_array() else {
            self.errors.push(rule.field, rule.type_message());
            return None;
        };

        let tags: Option<Vec<String>> = items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect();
        if tags.is_none() {
            self.errors.push(rule.field, TAG_NOT_STRING);
        }
        tags
    }

    fn flag(&mut self, rule: &FieldRule) -> Option<bool> {
        let raw = self.raw(rule)?;
        let flag = raw.as_bool();
        if flag.is_none() {
            self.errors.push(rule.field, rule.type_message());
        }
        flag
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

fn parse_uuid(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

/// Validate a path identifier before any store access.
pub fn parse_id(raw: &str) -> Result<Uuid, ValidationErrors> {
    parse_uuid(raw)
        .ok_or_else(|| ValidationErrors::single(schema::ID.field, schema::ID.type_message()))
}

/// Validate a create-post body. `category` is required here.
pub fn validate_create_post(body: &Value) -> Result<NewPost, ValidationErrors> {
    use schema::post::*;

    let mut checker = Checker::new(body, Mode::Create)?;
    let title = checker.text(&TITLE);
    let content = checker.text(&CONTENT);
    let author = checker.text(&AUTHOR);
    let category = checker.reference(&CATEGORY);
    let tags = checker.text_list(&TAGS);
    let published = checker.flag(&PUBLISHED);

    let input = match (title, content, author, category) {
        (Some(title), Some(content), Some(author), Some(category)) => Some(NewPost {
            title,
            content,
            author,
            category,
            tags,
            published,
        }),
        _ => None,
    };
    checker.finish(input)
}

/// Validate an update-post body. Every field is optional.
pub fn validate_post_patch(body: &Value) -> Result<PostPatch, ValidationErrors> {
    use schema::post::*;

    let mut checker = Checker::new(body, Mode::Update)?;
    let patch = PostPatch {
        title: checker.text(&TITLE),
        content: checker.text(&CONTENT),
        author: checker.text(&AUTHOR),
        category: checker.reference(&CATEGORY),
        tags: checker.text_list(&TAGS),
        published: checker.flag(&PUBLISHED),
    };
    checker.finish(Some(patch))
}

/// Validate a create-category body.
pub fn validate_new_category(body: &Value) -> Result<NewCategory, ValidationErrors> {
    let mut checker = Checker::new(body, Mode::Create)?;
    let name = checker.text(&schema::category::NAME);
    checker.finish(name.map(|name| NewCategory { name }))
}

/// Re-check a post against the rule table right before it is written.
pub fn check_post(post: &Post) -> Result<(), ValidationErrors> {
    use schema::post::*;

    let mut errors = ValidationErrors::default();
    for (rule, value) in [
        (&TITLE, &post.title),
        (&CONTENT, &post.content),
        (&AUTHOR, &post.author),
    ] {
        if let Err(message) = rule.check_len(rule.normalize(value), rule.required) {
            errors.push(rule.field, message);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Re-check a category against the rule table right before it is written.
pub fn check_category(category: &Category) -> Result<(), ValidationErrors> {
    let rule = &schema::category::NAME;
    rule.check_len(rule.normalize(&category.name), rule.required)
        .map_err(|message| ValidationErrors::single(rule.field, message))
}
