//! Settings effects and the rendering boundary that applies them.
//!
//! DESIGN
//! ======
//! `EffectDescriptor::for_settings` is a pure function of the bundle: it
//! says what the document should look like, not how to get there. An
//! `EffectTarget` (the live document under `hydrate`, `MemoryDocument`
//! elsewhere) applies it. Every marker is written as present or absent on
//! each apply, so applying the same descriptor twice leaves the same state.
//!
//! `signLanguage` and `screenReader` carry no document effect here; content
//! components read them directly.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use std::collections::BTreeSet;

use super::AccessibilitySettings;

pub const DARK_MARKER: &str = "dark";
pub const HIGH_CONTRAST_MARKER: &str = "high-contrast";
pub const REDUCE_MOTION_MARKER: &str = "reduce-motion";

/// Element a marker class lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The document (`<html>`) element.
    Root,
    /// The `<body>` element.
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEffect {
    pub surface: Surface,
    pub marker: &'static str,
    pub present: bool,
}

/// Complete description of the document state implied by one settings bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDescriptor {
    pub root_font_px: u32,
    pub markers: [MarkerEffect; 3],
}

impl EffectDescriptor {
    #[must_use]
    pub fn for_settings(settings: &AccessibilitySettings) -> Self {
        Self {
            root_font_px: settings.font_size.px(),
            markers: [
                MarkerEffect { surface: Surface::Root, marker: DARK_MARKER, present: settings.dark_mode },
                MarkerEffect { surface: Surface::Body, marker: HIGH_CONTRAST_MARKER, present: settings.high_contrast },
                MarkerEffect { surface: Surface::Body, marker: REDUCE_MOTION_MARKER, present: settings.reduce_motion },
            ],
        }
    }

    /// Push every effect to `target`.
    pub fn apply_to<T: EffectTarget + ?Sized>(&self, target: &mut T) {
        target.set_root_font_px(self.root_font_px);
        for effect in &self.markers {
            target.set_marker(effect.surface, effect.marker, effect.present);
        }
    }
}

/// Rendering boundary that turns descriptors into document mutations.
pub trait EffectTarget {
    fn set_root_font_px(&mut self, px: u32);
    fn set_marker(&mut self, surface: Surface, marker: &str, present: bool);
}

/// Headless document model: root font size plus marker classes per surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    root_font_px: Option<u32>,
    root_markers: BTreeSet<String>,
    body_markers: BTreeSet<String>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until a descriptor has been applied.
    #[must_use]
    pub fn root_font_px(&self) -> Option<u32> {
        self.root_font_px
    }

    #[must_use]
    pub fn has_marker(&self, surface: Surface, marker: &str) -> bool {
        self.markers(surface).contains(marker)
    }

    fn markers(&self, surface: Surface) -> &BTreeSet<String> {
        match surface {
            Surface::Root => &self.root_markers,
            Surface::Body => &self.body_markers,
        }
    }
}

impl EffectTarget for MemoryDocument {
    fn set_root_font_px(&mut self, px: u32) {
        self.root_font_px = Some(px);
    }

    fn set_marker(&mut self, surface: Surface, marker: &str, present: bool) {
        let set = match surface {
            Surface::Root => &mut self.root_markers,
            Surface::Body => &mut self.body_markers,
        };
        if present {
            set.insert(marker.to_owned());
        } else {
            set.remove(marker);
        }
    }
}
