//! Settings store: one authoritative bundle, two persistence targets.
//!
//! DESIGN
//! ======
//! `SettingsStore` owns the in-memory `AccessibilitySettings` and is the
//! only writer of its persisted copies. Every change, in order:
//!
//! 1. replaces exactly one field,
//! 2. applies the effects of the whole resulting bundle to the target,
//! 3. writes the bundle to local storage under `STORAGE_KEY`,
//! 4. schedules a profile upsert if a session exists (write-behind).
//!
//! Steps 1-3 are visible before `change` returns. Step 4 is never awaited.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. Unreadable or malformed local data means
//! "no saved settings"; a failed local write or remote upsert is logged and
//! the in-memory bundle stays as changed.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{debug, error, info, warn};

use super::effects::{EffectDescriptor, EffectTarget};
use super::{AccessibilitySettings, SettingChange, SettingKey};
use crate::auth::Session;
use crate::notice::{Notice, NoticeBoard};
use crate::storage::KeyValueStore;
use crate::write_behind::WriteBehind;

/// Local storage key holding the JSON bundle.
pub const STORAGE_KEY: &str = "accessibilitySettings";

const CHANGE_NOTICE_MS: u64 = 2000;

pub struct SettingsStore<T: EffectTarget> {
    settings: AccessibilitySettings,
    target: T,
    storage: Box<dyn KeyValueStore>,
    session: Option<Session>,
    notices: NoticeBoard,
    writes: WriteBehind,
}

impl<T: EffectTarget> SettingsStore<T> {
    /// Start from defaults. Nothing is read or applied until `load`.
    #[must_use]
    pub fn new(target: T, storage: Box<dyn KeyValueStore>, notices: NoticeBoard) -> Self {
        Self {
            settings: AccessibilitySettings::default(),
            target,
            storage,
            session: None,
            notices,
            writes: WriteBehind::new("profile_settings"),
        }
    }

    #[must_use]
    pub fn settings(&self) -> AccessibilitySettings {
        self.settings
    }

    /// The rendering boundary effects are applied to.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[must_use]
    pub fn effects(&self) -> EffectDescriptor {
        EffectDescriptor::for_settings(&self.settings)
    }

    /// Attach or clear the identity that remote writes are made for.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    /// Hydrate from local storage and apply. Absent, unreadable or malformed
    /// data keeps the current bundle.
    pub fn load(&mut self) -> AccessibilitySettings {
        match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => match AccessibilitySettings::from_json(&raw) {
                Some(saved) => {
                    debug!(?saved, "loaded saved accessibility settings");
                    self.settings = saved;
                }
                None => debug!("saved accessibility settings malformed; keeping defaults"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "local settings read failed; keeping defaults"),
        }
        self.apply();
        self.settings
    }

    /// Replace one field, apply, persist locally, and schedule the remote upsert.
    pub fn change(&mut self, change: SettingChange) -> AccessibilitySettings {
        self.settings = self.settings.with(change);
        self.apply();
        self.persist_local();
        self.push_remote();

        let (title, description) = change.describe();
        self.notices.push(Notice::new(title, description, CHANGE_NOTICE_MS));
        self.settings
    }

    /// Flip a boolean field. `None` for `FontSize`, which has no toggle.
    pub fn toggle(&mut self, key: SettingKey) -> Option<AccessibilitySettings> {
        SettingChange::toggle(key, &self.settings).map(|change| self.change(change))
    }

    /// Adopt the bundle stored on the signed-in profile, if it parses fully.
    /// The adopted bundle is applied and saved locally but not echoed back.
    pub async fn adopt_remote(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let raw = match session.backend.fetch_profile_settings(&session.identity).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, user_id = %session.identity.id, "profile settings fetch failed");
                return false;
            }
        };
        let Some(remote) = AccessibilitySettings::from_value(raw) else {
            warn!(user_id = %session.identity.id, "profile settings malformed; ignoring");
            return false;
        };
        info!(user_id = %session.identity.id, "adopted profile accessibility settings");
        self.settings = remote;
        self.apply();
        self.persist_local();
        true
    }

    /// Remote upserts scheduled and not yet settled.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.pending()
    }

    /// Wait for scheduled upserts. Interactive callers never need this.
    pub async fn flush(&mut self) {
        self.writes.flush().await;
    }

    fn apply(&mut self) {
        EffectDescriptor::for_settings(&self.settings).apply_to(&mut self.target);
    }

    fn persist_local(&mut self) {
        let raw = match serde_json::to_string(&self.settings) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "accessibility settings encode failed");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(STORAGE_KEY, &raw) {
            warn!(error = %e, "local settings write failed");
        }
    }

    fn push_remote(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let settings = self.settings;
        self.writes.submit(async move {
            if let Err(e) = session.backend.upsert_profile_settings(&session.identity, &settings).await {
                error!(error = %e, user_id = %session.identity.id, "error saving accessibility settings");
            }
        });
    }
}
