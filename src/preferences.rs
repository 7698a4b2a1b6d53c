use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::codec::audio;
use crate::error::ParseError;

/// Audio codec the user can force every stream into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodecOut {
    #[default]
    None,
    Ac3,
    Aac,
    Flac,
    Mp3,
    Opus,
    Vorbis,
}

impl AudioCodecOut {
    pub fn codec_name(self) -> Option<&'static str> {
        match self {
            AudioCodecOut::None => None,
            AudioCodecOut::Ac3 => Some(audio::AC3),
            AudioCodecOut::Aac => Some(audio::AAC),
            AudioCodecOut::Flac => Some(audio::FLAC),
            AudioCodecOut::Mp3 => Some(audio::MP3),
            AudioCodecOut::Opus => Some(audio::OPUS),
            AudioCodecOut::Vorbis => Some(audio::VORBIS),
        }
    }
}

impl FromStr for AudioCodecOut {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(AudioCodecOut::None),
            "ac3" => Ok(AudioCodecOut::Ac3),
            "aac" => Ok(AudioCodecOut::Aac),
            "flac" => Ok(AudioCodecOut::Flac),
            "mp3" => Ok(AudioCodecOut::Mp3),
            "opus" => Ok(AudioCodecOut::Opus),
            "vorbis" => Ok(AudioCodecOut::Vorbis),
            other => Err(ParseError::UnknownAudioCodec(other.to_string())),
        }
    }
}

impl fmt::Display for AudioCodecOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec_name().unwrap_or("none"))
    }
}

/// Stored preference values, as kept by the client's key-value store.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserSettings {
    #[serde(default)]
    pub dts_enabled: bool,
    #[serde(default)]
    pub extra_surround_enabled: bool,
    #[serde(default)]
    pub forced_audio_codec: AudioCodecOut,
    #[serde(default)]
    pub force_stereo: bool,
    #[serde(default)]
    pub live_tv: bool,
    #[serde(default)]
    pub downmix_audio: Option<bool>,
    #[serde(default)]
    pub max_bitrate_mbps: Option<u32>,
}

impl UserSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preference file: {}", path.display()))?;
        let settings: UserSettings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse preference YAML: {}", path.display()))?;
        Ok(settings)
    }

    pub fn resolve(&self) -> PlaybackPreferences {
        let forced_audio_codec = self.forced_audio_codec.codec_name();

        // Stereo can only be forced while surround output is off; mp3 is stereo-only.
        let mut force_stereo = !self.extra_surround_enabled && self.force_stereo;
        if forced_audio_codec == Some(audio::MP3) {
            force_stereo = true;
        }

        PlaybackPreferences {
            dts_enabled: self.dts_enabled,
            extra_surround_enabled: self.extra_surround_enabled,
            forced_audio_codec: forced_audio_codec.map(str::to_string),
            forced_channel_count: force_stereo.then_some(2),
            is_live_tv: self.live_tv,
            downmix_audio: self.downmix_audio.unwrap_or(true),
            max_bitrate_mbps: self.max_bitrate_mbps.filter(|mbps| *mbps > 0),
        }
    }
}

/// Inputs every profile assembler is parameterized by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackPreferences {
    pub dts_enabled: bool,
    pub extra_surround_enabled: bool,
    pub forced_audio_codec: Option<String>,
    pub forced_channel_count: Option<u32>,
    pub is_live_tv: bool,
    pub downmix_audio: bool,
    pub max_bitrate_mbps: Option<u32>,
}

impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            dts_enabled: false,
            extra_surround_enabled: false,
            forced_audio_codec: None,
            forced_channel_count: None,
            is_live_tv: false,
            downmix_audio: true,
            max_bitrate_mbps: None,
        }
    }
}

impl PlaybackPreferences {
    pub fn forced_audio_codec(&self) -> Option<&str> {
        self.forced_audio_codec
            .as_deref()
            .map(str::trim)
            .filter(|codec| !codec.is_empty())
    }

    /// Channel ceiling for a codec tier gated by `tier_enabled`.
    pub fn channel_ceiling(&self, tier_enabled: bool) -> u32 {
        self.forced_channel_count
            .unwrap_or(if tier_enabled { 8 } else { 2 })
    }
}
