//! Sign language dictionary and simulated recognition.
//!
//! The dictionary comes from the backend with a static fallback. Recognition
//! is a placeholder: while a camera session is active it draws a random
//! sign from a fixed vocabulary every few seconds. It does not look at the
//! camera frames and is not a recognition algorithm; a real one needs a
//! model integration this crate does not have.

#[cfg(test)]
#[path = "signs_test.rs"]
mod signs_test;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::announcer::Announcer;
use crate::backend::Backend;
use crate::notice::{Notice, NoticeBoard};
use crate::task;

// =============================================================================
// DICTIONARY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignEntry {
    pub id: String,
    pub sign: String,
    pub meaning: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

const STATIC_SIGNS: &[(&str, &str, &str, &str)] = &[
    ("Hello", "A greeting used when meeting someone", "greetings", "photo-1508214751196-bcfd4ca60f91"),
    ("Thank you", "An expression of gratitude", "courtesy", "photo-1489533119213-66a5cd877091"),
    ("Yes", "Affirmative response", "responses", "photo-1566492031773-4f4e44671857"),
    ("No", "Negative response", "responses", "photo-1597248374161-426f0d6d2fc9"),
    ("Help", "Request for assistance", "requests", "photo-1469571486292-0ba58a3f068b"),
    ("Learn", "To gain knowledge or skill", "education", "photo-1503676260728-1c00da094a0b"),
    ("Computer", "An electronic device for processing data", "technology", "photo-1517430816045-df4b7de11d1d"),
    ("Book", "A written or printed work", "objects", "photo-1495446815901-a7297e633e8d"),
];

#[must_use]
pub fn static_signs() -> Vec<SignEntry> {
    (1u32..)
        .zip(STATIC_SIGNS.iter())
        .map(|(id, (sign, meaning, category, photo))| SignEntry {
            id: id.to_string(),
            sign: (*sign).to_owned(),
            meaning: (*meaning).to_owned(),
            category: Some((*category).to_owned()),
            image_url: Some(format!("https://images.unsplash.com/{photo}?w=800&auto=format&fit=crop")),
            video_url: None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct SignDictionary {
    pub entries: Vec<SignEntry>,
    pub source: SignSource,
}

impl SignDictionary {
    /// Load from the backend. An empty result or a failure falls back to the
    /// static signs with a notice.
    pub async fn load(backend: Option<&Arc<dyn Backend>>, announcer: &Announcer, notices: &NoticeBoard) -> Self {
        let result = match backend {
            Some(backend) => Some(backend.fetch_signs().await),
            None => None,
        };
        match result {
            Some(Ok(entries)) if !entries.is_empty() => {
                announcer.announce(format!("{} sign language signs loaded", entries.len()));
                Self { entries, source: SignSource::Remote }
            }
            Some(Ok(_)) | None => {
                let entries = static_signs();
                announcer.announce(format!("{} demo sign language signs loaded", entries.len()));
                if backend.is_some() {
                    notices.push(
                        Notice::new(
                            "Using Demo Content",
                            "Couldn't load sign language data from the server. Displaying demo content.",
                            5000,
                        )
                        .destructive(),
                    );
                }
                Self { entries, source: SignSource::Fallback }
            }
            Some(Err(e)) => {
                error!(error = %e, "error fetching sign language data");
                notices.push(
                    Notice::new(
                        "Error Loading Data",
                        "There was an error loading sign language data. Displaying demo content.",
                        5000,
                    )
                    .destructive(),
                );
                Self { entries: static_signs(), source: SignSource::Fallback }
            }
        }
    }

    /// Case-insensitive search over sign and meaning plus a category filter
    /// (`"all"` matches everything). Announces the result count.
    pub fn search(&self, term: &str, category: &str, announcer: &Announcer) -> Vec<&SignEntry> {
        let term = term.to_lowercase();
        let found: Vec<&SignEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                term.is_empty()
                    || entry.sign.to_lowercase().contains(&term)
                    || entry.meaning.to_lowercase().contains(&term)
            })
            .filter(|entry| category == crate::catalog::ALL_CATEGORIES || entry.category.as_deref() == Some(category))
            .collect();
        announcer.announce(format!("{} sign language signs found", found.len()));
        found
    }
}

/// Narration for switching the category filter.
#[must_use]
pub fn category_announcement(category: &str) -> String {
    format!("Category changed to {category}")
}

// =============================================================================
// SIMULATED RECOGNITION
// =============================================================================

/// Vocabulary the simulation draws from.
pub const SIMULATED_SIGNS: [&str; 6] = ["Hello", "Thank you", "Yes", "No", "Help", "Learn"];

pub const SIMULATION_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
#[error("camera unavailable: {0}")]
pub struct CameraError(pub String);

/// Video capture seam. Only start/stop matter to the simulation.
pub trait Camera {
    /// Request the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if permission is denied or no device exists.
    fn start(&mut self) -> Result<(), CameraError>;

    /// Stop every track of the stream.
    fn stop(&mut self);
}

/// Draw one simulated detection.
pub fn simulate_detection<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SIMULATED_SIGNS.choose(rng).copied().unwrap_or(SIMULATED_SIGNS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    Unknown,
    Granted,
    Denied,
}

pub struct SignRecognition<C: Camera> {
    camera: C,
    permission: CameraPermission,
    /// Dropping the sender ends the ticker.
    ticker: Option<oneshot::Sender<()>>,
    announcer: Announcer,
    notices: NoticeBoard,
}

impl<C: Camera> SignRecognition<C> {
    #[must_use]
    pub fn new(camera: C, announcer: Announcer, notices: NoticeBoard) -> Self {
        Self { camera, permission: CameraPermission::Unknown, ticker: None, announcer, notices }
    }

    #[must_use]
    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ticker.is_some()
    }

    /// Open the camera and start simulated detections every `interval`.
    pub fn start(&mut self, interval: Duration) -> bool {
        if self.is_active() {
            return true;
        }
        if let Err(e) = self.camera.start() {
            error!(error = %e, "error accessing camera");
            self.permission = CameraPermission::Denied;
            self.notices.push(
                Notice::new(
                    "Camera Access Failed",
                    "Please allow camera permissions to use sign language recognition",
                    3000,
                )
                .destructive(),
            );
            return false;
        }
        self.permission = CameraPermission::Granted;

        let announcer = self.announcer.clone();
        let (stop, stopped) = oneshot::channel();
        if task::spawn_detached(run_ticker(interval, announcer, stopped)).is_err() {
            // Camera is open but nothing can drive detections.
            self.camera.stop();
            return false;
        }
        self.ticker = Some(stop);
        info!("simulated sign recognition started");
        self.notices.push(Notice::new("Camera Started", "Sign language recognition is now active", 2000));
        true
    }

    /// Stop detections and release the camera.
    pub fn stop(&mut self) {
        if self.ticker.take().is_none() {
            return;
        }
        self.camera.stop();
        self.notices.push(Notice::new("Camera Stopped", "Sign language recognition has been deactivated", 2000));
    }
}

impl<C: Camera> Drop for SignRecognition<C> {
    fn drop(&mut self) {
        if self.ticker.take().is_some() {
            self.camera.stop();
        }
    }
}

async fn run_ticker(interval: Duration, announcer: Announcer, mut stopped: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            biased;
            _ = &mut stopped => return,
            () = task::sleep(interval) => {
                let sign = simulate_detection(&mut rand::rng());
                announcer.announce(format!("Sign detected: {sign}"));
            }
        }
    }
}
