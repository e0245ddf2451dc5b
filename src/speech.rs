//! Text-to-speech controls.
//!
//! `TextToSpeech` holds rate/pitch and whether an utterance is playing.
//! The speak control doubles as stop: invoking it mid-utterance cancels.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

use tracing::error;

use crate::notice::{Notice, NoticeBoard};

pub const MIN_RATE: f32 = 0.5;
pub const MAX_RATE: f32 = 2.0;
pub const MIN_PITCH: f32 = 0.5;
pub const MAX_PITCH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
}

#[derive(Debug, thiserror::Error)]
#[error("speech synthesis failed: {0}")]
pub struct SpeechError(pub String);

/// Speech synthesis seam.
pub trait SpeechSynth {
    /// Queue an utterance for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis is unavailable.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakAction {
    /// Blank text; nothing queued.
    Rejected,
    Started,
    /// The control was pressed while speaking.
    Stopped,
    Failed,
}

pub struct TextToSpeech<S: SpeechSynth> {
    synth: S,
    rate: f32,
    pitch: f32,
    speaking: bool,
    notices: NoticeBoard,
}

impl<S: SpeechSynth> TextToSpeech<S> {
    #[must_use]
    pub fn new(synth: S, notices: NoticeBoard) -> Self {
        Self { synth, rate: 1.0, pitch: 1.0, speaking: false, notices }
    }

    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Clamped to `MIN_RATE..=MAX_RATE`. Non-finite input is ignored.
    pub fn set_rate(&mut self, rate: f32) {
        if rate.is_finite() {
            self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        }
    }

    /// Clamped to `MIN_PITCH..=MAX_PITCH`. Non-finite input is ignored.
    pub fn set_pitch(&mut self, pitch: f32) {
        if pitch.is_finite() {
            self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        }
    }

    /// Speak `text`, or cancel if already speaking.
    pub fn toggle(&mut self, text: &str) -> SpeakAction {
        if text.trim().is_empty() {
            self.notices.push(Notice::new("No Text Provided", "Please enter text to be spoken", 2000).destructive());
            return SpeakAction::Rejected;
        }
        if self.speaking {
            self.synth.cancel();
            self.speaking = false;
            self.notices.push(Notice::new("Speech Stopped", "Text-to-speech has been cancelled", 2000));
            return SpeakAction::Stopped;
        }

        let utterance = Utterance { text: text.to_owned(), rate: self.rate, pitch: self.pitch };
        match self.synth.speak(&utterance) {
            Ok(()) => {
                self.speaking = true;
                SpeakAction::Started
            }
            Err(e) => {
                self.on_error(&e.to_string());
                SpeakAction::Failed
            }
        }
    }

    /// Playback finished on its own.
    pub fn on_end(&mut self) {
        if !self.speaking {
            return;
        }
        self.speaking = false;
        self.notices.push(Notice::new("Speech Completed", "Text-to-speech playback has finished", 2000));
    }

    pub fn on_error(&mut self, message: &str) {
        error!(error = message, "speech synthesis error");
        self.speaking = false;
        self.notices.push(
            Notice::new("Speech Error", "An error occurred during text-to-speech playback", 3000).destructive(),
        );
    }
}
