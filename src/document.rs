use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::players::PlayerKind;
use crate::profile::DeviceProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// An exported profile together with where and when it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub player: PlayerKind,
    pub generated_at: DateTime<Utc>,
    pub fingerprint: String,
    pub profile: DeviceProfile,
}

impl ProfileDocument {
    pub fn new(player: PlayerKind, profile: DeviceProfile) -> Self {
        Self {
            player,
            generated_at: Utc::now(),
            fingerprint: profile.fingerprint(),
            profile,
        }
    }

    pub fn render(&self, format: DocumentFormat) -> Result<String> {
        let rendered = match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
            DocumentFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(rendered)
    }

    pub fn write(&self, destination: &Path, format: DocumentFormat) -> Result<PathBuf> {
        let rendered = self.render(format)?;
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(destination, rendered)
            .with_context(|| format!("Failed to write profile document: {}", destination.display()))?;
        Ok(destination.to_path_buf())
    }

    /// Whether the embedded profile still hashes to the recorded fingerprint.
    pub fn is_intact(&self) -> bool {
        self.profile.fingerprint() == self.fingerprint
    }
}

/// Loads either a bare profile or an exported document.
pub fn load_profile(path: &Path) -> Result<DeviceProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {}", path.display()))?;
    let format = DocumentFormat::from_path(path);

    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str::<ProfileDocument>(&content)
            .map(|doc| doc.profile)
            .or_else(|_| serde_json::from_str::<DeviceProfile>(&content))
            .with_context(|| format!("Failed to parse profile JSON: {}", path.display()))?,
        DocumentFormat::Yaml => serde_yaml::from_str::<ProfileDocument>(&content)
            .map(|doc| doc.profile)
            .or_else(|_| serde_yaml::from_str::<DeviceProfile>(&content))
            .with_context(|| format!("Failed to parse profile YAML: {}", path.display()))?,
    };
    Ok(parsed)
}
