//! Profile persistence
//!
//! The session profile lives in a single JSON file. A missing file starts a
//! fresh profile; a corrupt one is an error rather than a silent reset.

use anyhow::{Context, Result};
use ecowise_shared::EcoProfile;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load the profile at `path`, or a new one when the file does not exist
pub fn load_profile(path: &Path) -> Result<EcoProfile> {
    if !path.exists() {
        info!(path = %path.display(), "No saved profile, starting a new session");
        return Ok(EcoProfile::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: EcoProfile = serde_json::from_str(&raw)
        .with_context(|| format!("Profile {} is not valid JSON", path.display()))?;

    debug!(
        profile_id = %profile.id,
        eco_score = profile.eco_score,
        eco_points = profile.eco_points,
        "Profile loaded"
    );
    Ok(profile)
}

/// Write the profile to `path`
///
/// The JSON goes to a sibling temp file first and is renamed into place, so
/// an interrupted write never truncates the previous profile.
pub fn save_profile(path: &Path, profile: &EcoProfile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(profile)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!(path = %path.display(), profile_id = %profile.id, "Profile saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ecowise-storage-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_gives_new_profile() {
        let dir = scratch_dir("missing");
        let profile = load_profile(&dir.join("profile.json")).unwrap();
        assert_eq!(profile.eco_score, 850);
        assert_eq!(profile.eco_points, 250);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let path = dir.join("nested").join("profile.json");

        let mut profile = EcoProfile::default();
        profile.eco_score = 905;
        profile.completed_actions.push("journey_start".to_string());
        save_profile(&path, &profile).unwrap();

        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, profile);
        assert!(!path.with_extension("json.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_profile(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
