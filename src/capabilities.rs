use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DECODERS_ENV: &str = "LEANBACK_DECODERS";
pub const MANUFACTURER_ENV: &str = "LEANBACK_DEVICE_MANUFACTURER";
pub const MODEL_ENV: &str = "LEANBACK_DEVICE_MODEL";

const HEVC_MIME: &str = "video/hevc";
const AVC_MIME: &str = "video/avc";

/// One decoder entry as reported by the platform's codec enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderInfo {
    pub mime: String,
    #[serde(default)]
    pub profiles: Vec<String>,
}

impl DecoderInfo {
    pub fn new(mime: impl Into<String>, profiles: &[&str]) -> Self {
        Self {
            mime: mime.into(),
            profiles: profiles.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn handles(&self, mime: &str) -> bool {
        self.mime.trim().eq_ignore_ascii_case(mime)
    }

    fn supports_profile(&self, profile: &str) -> bool {
        self.profiles
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(profile))
    }
}

/// Source of decoder facts. `None` means the inventory could not be
/// enumerated at all.
pub trait DecoderInventory {
    fn decoders(&self) -> Option<Vec<DecoderInfo>>;
}

impl DecoderInventory for Vec<DecoderInfo> {
    fn decoders(&self) -> Option<Vec<DecoderInfo>> {
        Some(self.clone())
    }
}

/// Reads `LEANBACK_DECODERS`, formatted as `mime:profile,profile;mime:...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInventory;

impl DecoderInventory for EnvInventory {
    fn decoders(&self) -> Option<Vec<DecoderInfo>> {
        std::env::var(DECODERS_ENV)
            .ok()
            .map(|raw| parse_decoder_list(&raw))
    }
}

fn parse_decoder_list(raw: &str) -> Vec<DecoderInfo> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (mime, profiles) = entry.split_once(':').unwrap_or((entry, ""));
            DecoderInfo {
                mime: mime.trim().to_ascii_lowercase(),
                profiles: profiles
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceFamily {
    FireTvStick4k,
    FireTvGen2,
    FireTv,
    ShieldTv,
    ZidooRtk,
    #[default]
    Generic,
}

impl DeviceFamily {
    pub fn from_model(manufacturer: &str, model: &str) -> Self {
        let model = model.trim();
        if manufacturer.trim().eq_ignore_ascii_case("zidoo") {
            return DeviceFamily::ZidooRtk;
        }
        match model {
            "AFTMM" => DeviceFamily::FireTvStick4k,
            "AFTS" => DeviceFamily::FireTvGen2,
            m if m.starts_with("AFT") => DeviceFamily::FireTv,
            m if m.starts_with("SHIELD") => DeviceFamily::ShieldTv,
            _ => DeviceFamily::Generic,
        }
    }

    fn from_env() -> Self {
        let manufacturer = std::env::var(MANUFACTURER_ENV).unwrap_or_default();
        let model = std::env::var(MODEL_ENV).unwrap_or_default();
        Self::from_model(&manufacturer, &model)
    }

    /// Highest H.264 level (as the server's integer string) the family decodes.
    pub fn h264_level_ceiling(self) -> &'static str {
        match self {
            DeviceFamily::FireTvStick4k | DeviceFamily::ShieldTv | DeviceFamily::ZidooRtk => "52",
            DeviceFamily::FireTvGen2 => "51",
            DeviceFamily::FireTv => "41",
            DeviceFamily::Generic => "51",
        }
    }

    pub fn is_low_power(self) -> bool {
        matches!(self, DeviceFamily::FireTv)
    }
}

/// Decoder facts for one device, computed once and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    #[serde(default)]
    pub hevc: bool,
    #[serde(default)]
    pub hevc_main10: bool,
    #[serde(default)]
    pub avc_high10: bool,
    #[serde(default)]
    pub family: DeviceFamily,
}

impl DeviceCapabilities {
    pub fn probe(inventory: &dyn DecoderInventory, family: DeviceFamily) -> Self {
        let Some(decoders) = inventory.decoders() else {
            warn!("Decoder inventory unavailable; assuming no optional codec support");
            return Self {
                family,
                ..Self::default()
            };
        };

        let hevc = decoders.iter().find(|d| d.handles(HEVC_MIME));
        let avc = decoders.iter().find(|d| d.handles(AVC_MIME));

        let capabilities = Self {
            hevc: hevc.is_some(),
            hevc_main10: hevc.is_some_and(|d| d.supports_profile("main10")),
            avc_high10: avc.is_some_and(|d| d.supports_profile("high10")),
            family,
        };
        debug!(
            hevc = capabilities.hevc,
            hevc_main10 = capabilities.hevc_main10,
            avc_high10 = capabilities.avc_high10,
            family = ?capabilities.family,
            "Device capabilities probed"
        );
        capabilities
    }

    /// Process-wide probe of the environment inventory. The first caller
    /// pays for the enumeration; later callers get the cached answer.
    pub fn detect() -> &'static DeviceCapabilities {
        static DETECTED: OnceCell<DeviceCapabilities> = OnceCell::new();
        DETECTED.get_or_init(|| Self::probe(&EnvInventory, DeviceFamily::from_env()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read capability file: {}", path.display()))?;
        let facts: CapabilityFacts = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse capability YAML: {}", path.display()))?;
        Ok(facts.probe())
    }

    pub fn supports_hevc(&self) -> bool {
        self.hevc
    }

    pub fn supports_hevc_main10(&self) -> bool {
        self.hevc && self.hevc_main10
    }

    pub fn supports_avc_high10(&self) -> bool {
        self.avc_high10
    }
}

/// On-disk description of a device, as exported by the hosting application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityFacts {
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub decoders: Option<Vec<DecoderInfo>>,
}

impl CapabilityFacts {
    pub fn probe(self) -> DeviceCapabilities {
        let family = DeviceFamily::from_model(&self.manufacturer, &self.model);
        match self.decoders {
            Some(decoders) => DeviceCapabilities::probe(&decoders, family),
            None => DeviceCapabilities::probe(&Unavailable, family),
        }
    }
}

struct Unavailable;

impl DecoderInventory for Unavailable {
    fn decoders(&self) -> Option<Vec<DecoderInfo>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_decoder_list() {
        let parsed = parse_decoder_list("video/HEVC:main, main10 ; video/avc:high10;;");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].mime, "video/hevc");
        assert_eq!(parsed[0].profiles, vec!["main", "main10"]);
        assert_eq!(parsed[1].profiles, vec!["high10"]);
    }

    #[test]
    fn bare_mime_has_no_profiles() {
        let parsed = parse_decoder_list("video/hevc");
        assert_eq!(parsed, vec![DecoderInfo::new("video/hevc", &[])]);
    }
}
