//! WASM-compatible wrapper for deck rendering.
//!
//! This crate exposes validation, drafting and PPTX rendering to
//! JavaScript for use in Cloudflare Workers.

use chrono::{DateTime, NaiveDate, Utc};
use deck_core::naming::suggested_file_name;
use deck_core::{
    draft_presentation, presentation_from_model_output, DraftOptions, Error, Intake, LayoutOptions, PayloadOptions,
    Presentation,
};
use deck_pptx::RenderOptions;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Options accepted from JavaScript. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckOptions {
    /// Keep slides of unknown type instead of failing.
    pub lenient: bool,
    /// Treat the input as raw model output.
    pub from_model_output: bool,
    /// Author used when model output has none.
    pub default_author: Option<String>,
    /// Replaces the agenda title keywords.
    pub agenda_keywords: Option<Vec<String>>,
    pub max_text_len: Option<usize>,
}

/// Result of validating a deck description.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub title: Option<String>,
    pub slide_count: usize,
    /// Slide kinds in order, including unknown ones kept in lenient mode.
    pub kinds: Vec<String>,
    /// Zero-based index of the offending slide, when validation failed on one.
    pub slide_index: Option<usize>,
    pub error: Option<String>,
}

/// Result of rendering a deck.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    /// Suggested download name.
    pub file_name: String,
    pub slide_count: usize,
    /// The .pptx package.
    #[serde(with = "serde_bytes_vec")]
    pub bytes: Vec<u8>,
}

mod serde_bytes_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(deserializer)
    }
}

fn parse_options(options: JsValue) -> Result<DeckOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(DeckOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

fn load(input: &str, options: &DeckOptions) -> Result<Presentation, Error> {
    let intake = if options.lenient { Intake::Lenient } else { Intake::Strict };
    if options.from_model_output {
        let mut payload = PayloadOptions::new().with_intake(intake);
        if let Some(author) = &options.default_author {
            payload = payload.with_default_author(author.clone());
        }
        presentation_from_model_output(input, &payload)
    } else {
        Presentation::from_json(input, intake)
    }
}

fn layout_options(options: &DeckOptions) -> LayoutOptions {
    let mut layout = LayoutOptions::new();
    if let Some(max) = options.max_text_len {
        layout = layout.with_max_text_len(max);
    }
    if let Some(keywords) = &options.agenda_keywords {
        layout = layout.with_agenda_keywords(keywords);
    }
    layout
}

/// Validate a deck description without rendering it.
#[wasm_bindgen]
pub fn validate_deck(input: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = parse_options(options)?;
    let result = validate_deck_impl(input, &options);

    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn validate_deck_impl(input: &str, options: &DeckOptions) -> ValidationResult {
    match load(input, options) {
        Ok(presentation) => ValidationResult {
            valid: true,
            title: Some(presentation.title.clone()),
            slide_count: presentation.slides.len(),
            kinds: presentation.slides.iter().map(|s| s.kind_tag().to_string()).collect(),
            slide_index: None,
            error: None,
        },
        Err(e) => ValidationResult {
            valid: false,
            title: None,
            slide_count: 0,
            kinds: Vec::new(),
            slide_index: match &e {
                Error::Validation(v) => v.slide_index,
                _ => None,
            },
            error: Some(e.to_string()),
        },
    }
}

/// Render a deck description to a .pptx package.
///
/// # Arguments
/// * `input` - JSON deck description, or raw model output
/// * `options` - Optional `DeckOptions` object
///
/// # Returns
/// A JavaScript object with the file name and bytes, or throws on error.
#[wasm_bindgen]
pub fn render_deck(input: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = parse_options(options)?;
    let result = render_deck_impl(input, &options, now()).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn render_deck_impl(input: &str, options: &DeckOptions, at: DateTime<Utc>) -> Result<RenderResult, String> {
    let presentation = load(input, options).map_err(|e| e.to_string())?;
    let render = RenderOptions::new().with_created(at);
    let bytes = deck_pptx::render_presentation(&presentation, &layout_options(options), &render)
        .map_err(|e| format!("Rendering error: {}", e))?;

    Ok(RenderResult {
        file_name: suggested_file_name(&presentation.title, at.naive_utc()),
        slide_count: presentation.slides.len(),
        bytes,
    })
}

/// Draft a deck description from plain text.
///
/// # Arguments
/// * `text` - Free text; blank lines separate slides
/// * `author` - Optional author for the draft
///
/// # Returns
/// The drafted deck description as a JavaScript object.
#[wasm_bindgen]
pub fn draft_deck(text: &str, author: Option<String>) -> Result<JsValue, JsValue> {
    let presentation = draft_deck_impl(text, author, now().date_naive());

    serde_wasm_bindgen::to_value(&presentation)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn draft_deck_impl(text: &str, author: Option<String>, date: NaiveDate) -> Presentation {
    let mut options = DraftOptions::new(date);
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        options = options.with_author(author);
    }
    draft_presentation(text, &options)
}
