//! crates/reading_tutor_core/src/profile.rs
//!
//! The profile form view-model. The record is loaded once from the key-value
//! store, edited field by field in memory, and written back only by an explicit
//! save that has passed validation.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{ProfileRecord, ReadingLevel};
use crate::ports::{KeyValueStore, PortError, PortResult};

/// Version written alongside every stored profile record.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

//=========================================================================================
// Errors
//=========================================================================================

/// A single reason a profile cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationIssue {
    #[error("Name is required")]
    NameEmpty,
    #[error("Email is required")]
    EmailEmpty,
    #[error("Please enter a valid email address")]
    EmailMalformed,
}

/// Every validation issue that applies to a record, in check order.
///
/// Only constructed with at least one issue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .issues[0])]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// The issue surfaced to the user.
    pub fn first(&self) -> ValidationIssue {
        self.issues[0]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Stored data exists but is not a readable profile. The model has already
    /// fallen back to the default record when this is returned.
    #[error("Stored profile could not be read: {0}")]
    StorageRead(String),

    #[error("Storage error: {0}")]
    Port(#[from] PortError),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("The profile has not finished loading")]
    NotLoaded,

    #[error("There are no changes to save")]
    NoChanges,

    #[error("An avatar upload is already in progress")]
    UploadInProgress,

    #[error("Avatar upload is no longer current")]
    StaleUpload,

    #[error("Failed to read avatar image: {0}")]
    AvatarRead(String),
}

//=========================================================================================
// Field updates
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationToggle {
    Email,
    App,
    Achievements,
    DailyReminders,
}

/// One edit to the profile form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileField {
    Name(String),
    Email(String),
    Bio(String),
    ReadingLevel(ReadingLevel),
    DailyGoalMinutes(u32),
    DarkMode(bool),
    Notification {
        toggle: NotificationToggle,
        enabled: bool,
    },
    Interests(Vec<String>),
    Avatar(Option<String>),
}

impl ProfileField {
    fn apply_to(self, record: &mut ProfileRecord) {
        match self {
            ProfileField::Name(name) => record.name = name,
            ProfileField::Email(email) => record.email = email,
            ProfileField::Bio(bio) => record.bio = bio,
            ProfileField::ReadingLevel(level) => record.reading_level = level,
            ProfileField::DailyGoalMinutes(minutes) => record.daily_goal_minutes = minutes,
            ProfileField::DarkMode(enabled) => record.dark_mode = enabled,
            ProfileField::Notification { toggle, enabled } => {
                let settings = &mut record.notifications;
                match toggle {
                    NotificationToggle::Email => settings.email = enabled,
                    NotificationToggle::App => settings.app = enabled,
                    NotificationToggle::Achievements => settings.achievements = enabled,
                    NotificationToggle::DailyReminders => settings.daily_reminders = enabled,
                }
            }
            ProfileField::Interests(interests) => record.interests = interests,
            ProfileField::Avatar(avatar) => record.avatar = avatar,
        }
    }
}

/// Checks the record. The email check is a plain `@` test, not an address parser.
pub fn validate_record(record: &ProfileRecord) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    if record.name.trim().is_empty() {
        issues.push(ValidationIssue::NameEmpty);
    }
    let email = record.email.trim();
    if email.is_empty() {
        issues.push(ValidationIssue::EmailEmpty);
    } else if !email.contains('@') {
        issues.push(ValidationIssue::EmailMalformed);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

//=========================================================================================
// Stored representation
//=========================================================================================

#[derive(Serialize)]
struct StoredProfileRef<'a> {
    schema_version: u32,
    #[serde(flatten)]
    record: &'a ProfileRecord,
}

#[derive(Deserialize)]
struct StoredProfile {
    #[serde(default)]
    schema_version: u32,
    #[serde(flatten)]
    record: ProfileRecord,
}

/// Where the in-memory record came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Stored,
    Default,
}

/// A validated, serialized record waiting to be written.
#[derive(Debug)]
pub struct PendingSave {
    key: String,
    payload: String,
    snapshot: ProfileRecord,
}

impl PendingSave {
    pub async fn write(&self, store: &dyn KeyValueStore) -> PortResult<()> {
        store.set(&self.key, &self.payload).await
    }
}

//=========================================================================================
// Avatar uploads
//=========================================================================================

/// Proof that the holder owns the single in-flight avatar upload.
#[derive(Debug, PartialEq, Eq)]
pub struct AvatarUploadToken(u64);

/// A user-selected image file.
#[derive(Debug, Clone)]
pub struct AvatarFile {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encodes bytes as an inline `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

//=========================================================================================
// ProfileFormModel
//=========================================================================================

pub struct ProfileFormModel {
    store: Arc<dyn KeyValueStore>,
    key: String,
    record: ProfileRecord,
    snapshot: ProfileRecord,
    dirty: bool,
    is_loading: bool,
    is_saving: bool,
    upload_in_flight: Option<u64>,
    next_upload_id: u64,
}

impl ProfileFormModel {
    /// Creates a model in the loading state. Call `load()` before editing.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            record: ProfileRecord::default(),
            snapshot: ProfileRecord::default(),
            dirty: false,
            is_loading: true,
            is_saving: false,
            upload_in_flight: None,
            next_upload_id: 0,
        }
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_uploading_avatar(&self) -> bool {
        self.upload_in_flight.is_some()
    }

    /// Whether the save control should be enabled.
    pub fn can_save(&self) -> bool {
        self.dirty && !self.is_saving && !self.is_loading
    }

    /// Reads the stored record, falling back to the default one.
    ///
    /// A missing record is not an error. Unparseable data and store failures
    /// still leave the model loaded with the default record, but are reported.
    pub async fn load(&mut self) -> Result<LoadSource, ProfileError> {
        let outcome = match self.store.get(&self.key).await {
            Ok(None) => {
                debug!(key = %self.key, "No stored profile, using defaults");
                Ok((ProfileRecord::default(), LoadSource::Default))
            }
            Ok(Some(text)) => match serde_json::from_str::<StoredProfile>(&text) {
                Ok(stored) => {
                    if stored.schema_version != PROFILE_SCHEMA_VERSION {
                        debug!(
                            stored = stored.schema_version,
                            current = PROFILE_SCHEMA_VERSION,
                            "Loaded profile written by another schema version"
                        );
                    }
                    Ok((stored.record, LoadSource::Stored))
                }
                Err(e) => {
                    warn!(key = %self.key, "Stored profile is malformed, using defaults: {}", e);
                    Err(ProfileError::StorageRead(e.to_string()))
                }
            },
            Err(e) => {
                warn!(key = %self.key, "Failed to read stored profile, using defaults: {}", e);
                Err(ProfileError::Port(e))
            }
        };

        let (record, result) = match outcome {
            Ok((record, source)) => (record, Ok(source)),
            Err(e) => (ProfileRecord::default(), Err(e)),
        };
        self.snapshot = record.clone();
        self.record = record;
        self.dirty = false;
        self.is_loading = false;
        result
    }

    /// Applies one field edit and marks the form dirty.
    pub fn apply(&mut self, field: ProfileField) {
        field.apply_to(&mut self.record);
        self.dirty = true;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.record)
    }

    /// Reverts to the last loaded or saved record.
    pub fn discard(&mut self) {
        self.record = self.snapshot.clone();
        self.dirty = false;
    }

    /// Validates and serializes the record, marking a save as in flight.
    ///
    /// Only a loaded, dirty form can be saved. On error nothing about the model
    /// changes.
    pub fn prepare_save(&mut self) -> Result<PendingSave, ProfileError> {
        if self.is_saving {
            return Err(ProfileError::SaveInProgress);
        }
        if self.is_loading {
            return Err(ProfileError::NotLoaded);
        }
        if !self.dirty {
            return Err(ProfileError::NoChanges);
        }
        self.validate()?;

        let payload = serde_json::to_string(&StoredProfileRef {
            schema_version: PROFILE_SCHEMA_VERSION,
            record: &self.record,
        })
        .map_err(|e| ProfileError::Port(PortError::Unexpected(e.to_string())))?;

        self.is_saving = true;
        Ok(PendingSave {
            key: self.key.clone(),
            payload,
            snapshot: self.record.clone(),
        })
    }

    /// Records the outcome of writing a `PendingSave`.
    ///
    /// Edits made while the write was in flight keep the form dirty.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        written: PortResult<()>,
    ) -> Result<(), ProfileError> {
        self.is_saving = false;
        match written {
            Ok(()) => {
                self.dirty = self.record != pending.snapshot;
                self.snapshot = pending.snapshot;
                info!(key = %self.key, "Profile saved");
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to save profile: {}", e);
                Err(ProfileError::Port(e))
            }
        }
    }

    /// Validates and persists the full record.
    pub async fn save(&mut self) -> Result<(), ProfileError> {
        let pending = self.prepare_save()?;
        let written = pending.write(self.store.as_ref()).await;
        self.finish_save(pending, written)
    }

    /// Claims the single avatar upload slot.
    pub fn begin_avatar_upload(&mut self) -> Result<AvatarUploadToken, ProfileError> {
        if self.is_loading {
            return Err(ProfileError::NotLoaded);
        }
        if self.upload_in_flight.is_some() {
            return Err(ProfileError::UploadInProgress);
        }
        let id = self.next_upload_id;
        self.next_upload_id += 1;
        self.upload_in_flight = Some(id);
        Ok(AvatarUploadToken(id))
    }

    /// Finishes an upload started with `begin_avatar_upload`.
    ///
    /// A failed read or a non-image file keeps the previous avatar.
    pub fn complete_avatar_upload(
        &mut self,
        token: AvatarUploadToken,
        file: Result<AvatarFile, String>,
    ) -> Result<(), ProfileError> {
        if self.upload_in_flight != Some(token.0) {
            return Err(ProfileError::StaleUpload);
        }
        self.upload_in_flight = None;

        let file = file.map_err(|e| {
            warn!("Avatar upload failed: {}", e);
            ProfileError::AvatarRead(e)
        })?;
        if !file.mime.starts_with("image/") {
            warn!(mime = %file.mime, "Rejected non-image avatar upload");
            return Err(ProfileError::AvatarRead(format!(
                "'{}' is not an image type",
                file.mime
            )));
        }

        self.record.avatar = Some(encode_data_url(&file.mime, &file.bytes));
        self.dirty = true;
        info!(bytes = file.bytes.len(), "Avatar updated");
        Ok(())
    }
}
