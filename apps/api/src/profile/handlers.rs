//! Axum route handlers for the profile API.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::profile::normalizer::normalize_profile;
use crate::profile::retriever::extract_handle;
use crate::profile::validation::{inspect_profile, validate_profile, FeatureCheck};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RetrieveProfileRequest {
    /// Bare handle or full profile URL.
    pub profile: String,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub save: Option<SaveOptions>,
}

#[derive(Debug, Deserialize)]
pub struct SaveOptions {
    /// File name under `PROFILE_DATA_DIR`; `.txt` is appended when missing.
    pub file: String,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
pub struct RetrieveProfileResponse {
    pub handle: String,
    pub profile: Value,
    pub valid: bool,
    pub fields: Vec<FeatureCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

/// POST /api/v1/profiles/retrieve
///
/// Fetches a profile, normalizes and validates it, and optionally persists it.
/// A strict validation failure aborts before anything is saved.
pub async fn handle_retrieve_profile(
    State(state): State<AppState>,
    Json(request): Json<RetrieveProfileRequest>,
) -> Result<Json<RetrieveProfileResponse>, AppError> {
    let source = state.profiles.as_deref().ok_or_else(|| {
        AppError::Configuration("No profile API credentials configured".to_string())
    })?;

    let handle = extract_handle(&request.profile)?.to_string();

    if let Some(save) = &request.save {
        check_file_name(&save.file)?;
    }

    let raw = source.fetch(&handle).await?;
    let profile = normalize_profile(&raw).unwrap_or_else(|| Value::Object(Default::default()));

    let valid = validate_profile(&profile, request.strict)?;
    let fields = inspect_profile(&profile);

    let saved_to = match request.save {
        Some(save) => {
            let store = Arc::clone(&state.store);
            let folder = state.config.profile_data_dir.clone();
            let record = profile.clone();
            let path = tokio::task::spawn_blocking(move || {
                store.save(&record, &folder, save.file.trim(), save.overwrite)
            })
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Save task failed: {e}")))??;
            Some(path)
        }
        None => None,
    };

    info!("Profile {handle} processed (valid={valid})");

    Ok(Json(RetrieveProfileResponse {
        handle,
        profile,
        valid,
        fields,
        saved_to,
    }))
}

/// Save targets are plain file names inside the data folder.
fn check_file_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(AppError::InvalidInput(format!(
            "Invalid save file name '{name}'"
        )));
    }
    Ok(())
}
