//! # tech4all
//!
//! State layer for the Tech4All learning front-end: accessibility settings,
//! course progression gating, and the assistive affordances around them.
//!
//! The crate renders nothing itself. Every environment it touches (the
//! document, durable local storage, the hosted backend, speech synthesis,
//! vibration, the camera) is reached through a small trait so the decision
//! logic can be exercised without a browser. Real adapters exist for the
//! backend (`backend::rest`) and, behind the `hydrate` feature, for the
//! browser (`browser`).

pub mod announcer;
pub mod auth;
pub mod backend;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod catalog;
pub mod config;
pub mod course_view;
pub mod haptics;
pub mod notice;
pub mod progress;
pub mod settings;
pub mod signs;
pub mod speech;
pub mod storage;
pub mod task;
pub mod write_behind;

#[cfg(test)]
pub(crate) mod test_helpers;
