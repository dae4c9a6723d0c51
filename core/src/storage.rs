use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::history::AthleteHistory;
use crate::types::AthleteProfile;

/// Reads an athlete profile from disk (JSON).
/// A missing file gives a default profile (id "unknown", no body weight).
pub fn load_profile(path: impl AsRef<Path>) -> Result<AthleteProfile> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        let profile: AthleteProfile = serde_json::from_str(&contents)
            .with_context(|| format!("parsing profile {}", path.display()))?;
        info!("profile loaded from {} (id={})", path.display(), profile.id);
        Ok(profile)
    } else {
        warn!("no profile at {}, using default", path.display());
        Ok(AthleteProfile { id: crate::types::UNKNOWN_ATHLETE.to_string(), ..Default::default() })
    }
}

/// Writes a profile to disk as pretty JSON.
pub fn save_profile(profile: &AthleteProfile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json).with_context(|| format!("writing profile {}", path.display()))?;
    info!("profile saved to {} (id={})", path.display(), profile.id);
    Ok(())
}

/// Reads an athlete's history; a missing file is an empty history.
pub fn load_history(path: impl AsRef<Path>, athlete_id: &str) -> Result<AthleteHistory> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AthleteHistory::new(athlete_id));
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading history {}", path.display()))?;
    let history: AthleteHistory = serde_json::from_str(&contents)
        .with_context(|| format!("parsing history {}", path.display()))?;
    if history.athlete_id != athlete_id {
        anyhow::bail!(
            "history {} belongs to {}, not {}",
            path.display(),
            history.athlete_id,
            athlete_id
        );
    }
    info!("history loaded from {} ({} records)", path.display(), history.len());
    Ok(history)
}

pub fn save_history(history: &AthleteHistory, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path, json).with_context(|| format!("writing history {}", path.display()))?;
    info!("history saved to {} ({} records)", path.display(), history.len());
    Ok(())
}
