use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::capabilities::DeviceCapabilities;
use crate::error::ParseError;
use crate::preferences::PlaybackPreferences;
use crate::profile::{DeviceProfile, libvlc, zidoo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Libvlc,
    Zidoo,
}

impl PlayerKind {
    pub const ALL: [PlayerKind; 2] = [PlayerKind::Libvlc, PlayerKind::Zidoo];

    pub fn key(self) -> &'static str {
        match self {
            PlayerKind::Libvlc => "libvlc",
            PlayerKind::Zidoo => "zidoo",
        }
    }

    pub fn profile_name(self) -> &'static str {
        match self {
            PlayerKind::Libvlc => libvlc::NAME,
            PlayerKind::Zidoo => zidoo::NAME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PlayerKind::Libvlc => "In-app software player (libVLC)",
            PlayerKind::Zidoo => "Zidoo hardware player launched as an external app",
        }
    }

    pub fn build(self, prefs: &PlaybackPreferences, caps: &DeviceCapabilities) -> DeviceProfile {
        match self {
            PlayerKind::Libvlc => libvlc::build(prefs, caps),
            PlayerKind::Zidoo => zidoo::build(prefs, caps),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlayerKind::ALL
            .into_iter()
            .find(|kind| {
                kind.key().eq_ignore_ascii_case(wanted) || kind.profile_name() == wanted
            })
            .ok_or_else(|| ParseError::UnknownPlayer {
                name: wanted.to_string(),
                available: PlayerKind::ALL
                    .iter()
                    .map(|kind| kind.key())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
