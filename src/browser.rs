//! Browser adapters for the rendering boundary and platform seams.
//!
//! Compiled only with the `hydrate` feature. Each adapter is a thin shim
//! over `web-sys`; a missing window, document or API degrades to a no-op
//! (or an error value where the seam has one) instead of panicking.

use wasm_bindgen::{JsCast, JsValue};

use crate::haptics::Vibrator;
use crate::settings::effects::{EffectTarget, Surface};
use crate::speech::{SpeechError, SpeechSynth, Utterance};
use crate::storage::{KeyValueStore, StorageError};

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Applies effect descriptors to the live `<html>` and `<body>` elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDocument;

impl EffectTarget for BrowserDocument {
    fn set_root_font_px(&mut self, px: u32) {
        let Some(root) = document()
            .and_then(|doc| doc.document_element())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let _ = root.style().set_property("font-size", &format!("{px}px"));
    }

    fn set_marker(&mut self, surface: Surface, marker: &str, present: bool) {
        let Some(doc) = document() else {
            return;
        };
        let element: Option<web_sys::Element> = match surface {
            Surface::Root => doc.document_element(),
            Surface::Body => doc.body().map(Into::into),
        };
        if let Some(el) = element {
            let class_list = el.class_list();
            if present {
                let _ = class_list.add_1(marker);
            } else {
                let _ = class_list.remove_1(marker);
            }
        }
    }
}

// =============================================================================
// LOCAL STORAGE
// =============================================================================

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// `None` when the window has no `localStorage` (e.g. disabled by policy).
    #[must_use]
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| StorageError::Unavailable(js_message(&e)))
    }
}

// =============================================================================
// SPEECH
// =============================================================================

/// `window.speechSynthesis`. The host wires the utterance `end`/`error`
/// events back to `TextToSpeech::on_end`/`on_error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSpeech;

impl SpeechSynth for BrowserSpeech {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let window = web_sys::window().ok_or_else(|| SpeechError("no window".to_owned()))?;
        let synth = window.speech_synthesis().map_err(|e| SpeechError(js_message(&e)))?;
        let native =
            web_sys::SpeechSynthesisUtterance::new_with_text(&utterance.text).map_err(|e| SpeechError(js_message(&e)))?;
        native.set_rate(utterance.rate);
        native.set_pitch(utterance.pitch);
        synth.speak(&native);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
            synth.cancel();
        }
    }
}

// =============================================================================
// VIBRATION
// =============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserVibrator;

impl Vibrator for BrowserVibrator {
    fn supported(&self) -> bool {
        web_sys::window()
            .map(|w| w.navigator())
            .is_some_and(|nav| js_sys::Reflect::has(&nav, &JsValue::from_str("vibrate")).unwrap_or(false))
    }

    fn vibrate(&mut self, durations: &[u32]) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let pattern: js_sys::Array = durations.iter().map(|d| JsValue::from(*d)).collect();
        window.navigator().vibrate_with_pattern(&pattern)
    }
}
