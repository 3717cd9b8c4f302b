//! Intake of raw language-model output.
//!
//! Model replies are usually a bare JSON object, but sometimes arrive in a
//! fenced code block or wrapped in prose. This module recovers the object,
//! applies a few repairs, and validates the result.

use crate::error::{Error, Result};
use crate::types::{Intake, Presentation};
use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::{Map, Value};

/// Author used when the model omits one.
pub const DEFAULT_AUTHOR: &str = "作成者不明";

/// Format of title-slide dates.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Options for turning model output into a presentation.
#[derive(Debug, Clone)]
pub struct PayloadOptions {
    /// Author inserted when the payload has none.
    pub default_author: String,

    /// When set, every title slide's date is replaced with this one.
    pub stamp_date: Option<NaiveDate>,

    /// Slide kind strictness for validation.
    pub intake: Intake,
}

impl PayloadOptions {
    pub fn new() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
            stamp_date: None,
            intake: Intake::Strict,
        }
    }

    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    pub fn with_stamp_date(mut self, date: NaiveDate) -> Self {
        self.stamp_date = Some(date);
        self
    }

    pub fn with_intake(mut self, intake: Intake) -> Self {
        self.intake = intake;
        self
    }
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a date the way title slides expect it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Remove a surrounding Markdown code fence, with or without a `json` tag.
fn strip_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_suffix("```") else {
        return text;
    };
    if let Some(body) = inner.strip_prefix("```json") {
        body.trim()
    } else if let Some(body) = inner.strip_prefix("```") {
        body.trim()
    } else {
        text
    }
}

/// Recover the JSON object from raw model output.
///
/// Tries the fence-stripped text first, then the span from the first `{`
/// to the last `}`.
pub fn extract_json(raw: &str) -> Result<Value> {
    let cleaned = strip_fence(raw);

    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(direct) => {
            debug!("Direct parse failed ({}); scanning for an object", direct);
            let (Some(first), Some(last)) = (cleaned.find('{'), cleaned.rfind('}')) else {
                return Err(Error::InvalidPayload(
                    "could not find a JSON object in the model output".to_string(),
                ));
            };
            if first >= last {
                return Err(Error::InvalidPayload(
                    "could not find a JSON object in the model output".to_string(),
                ));
            }
            serde_json::from_str(&cleaned[first..=last])
                .map_err(|e| Error::InvalidPayload(format!("embedded object is not valid JSON: {}", e)))?
        }
    };

    if !value.is_object() {
        return Err(Error::InvalidPayload("model output is not a JSON object".to_string()));
    }
    Ok(value)
}

/// Apply the intake repairs to a parsed payload in place.
pub fn repair(value: &mut Value, options: &PayloadOptions) {
    let Some(object) = value.as_object_mut() else {
        return;
    };

    if !object.contains_key("author") {
        warn!(
            "Payload is missing 'author'; using '{}'",
            options.default_author
        );
        object.insert("author".to_string(), Value::String(options.default_author.clone()));
    }

    let Some(slides) = object.get_mut("slides").and_then(Value::as_array_mut) else {
        return;
    };
    for slide in slides.iter_mut().filter_map(Value::as_object_mut) {
        match slide.get("type").and_then(Value::as_str) {
            Some("title") => {
                if let Some(date) = options.stamp_date {
                    slide.insert("date".to_string(), Value::String(format_date(date)));
                }
            }
            Some("content") => split_content_into_points(slide),
            _ => {}
        }
    }
}

/// A content slide with a `content` string and no `points` gets one point
/// per line.
fn split_content_into_points(slide: &mut Map<String, Value>) {
    if slide.contains_key("points") {
        return;
    }
    if let Some(Value::String(content)) = slide.get("content") {
        let points = content
            .split('\n')
            .map(|line| Value::String(line.to_string()))
            .collect();
        slide.remove("content");
        slide.insert("points".to_string(), Value::Array(points));
    }
}

/// Turn raw model output into a validated presentation.
pub fn presentation_from_model_output(raw: &str, options: &PayloadOptions) -> Result<Presentation> {
    let mut value = extract_json(raw)?;
    repair(&mut value, options);
    Presentation::from_value(value, options.intake)
}
