use tracing::debug;

use crate::capabilities::DeviceCapabilities;
use crate::codec::{audio, video};
use crate::preferences::PlaybackPreferences;
use crate::profile::conditions::{hevc_codec_profile, max_audio_channels_codec_profile};
use crate::profile::tables::{ALWAYS_AUDIO, DTS_AUDIO, EXTRA_SURROUND_AUDIO};
use crate::profile::{CodecProfile, SubtitleDeliveryMethod, SubtitleProfile, owned};

/// Audio codecs a player may receive untouched, plus the channel ceilings
/// that go with them.
#[derive(Debug, Clone)]
pub struct AudioPlan {
    pub direct_play: Vec<String>,
    pub forced: Option<String>,
    pub channel_profiles: Vec<CodecProfile>,
}

impl AudioPlan {
    /// `extra_always` joins the always tier (e.g. live-TV only codecs).
    pub fn new(prefs: &PlaybackPreferences, extra_always: &[&str]) -> Self {
        if let Some(forced) = prefs.forced_audio_codec() {
            let codecs = vec![forced.to_string()];
            let ceiling = prefs.channel_ceiling(prefs.extra_surround_enabled);
            debug!(codec = forced, channels = ceiling, "Audio codec forced");
            return Self {
                channel_profiles: vec![max_audio_channels_codec_profile(Some(&codecs), ceiling)],
                direct_play: codecs,
                forced: Some(forced.to_string()),
            };
        }

        let mut always = owned(ALWAYS_AUDIO);
        always.extend(owned(extra_always));

        let tiers = [
            (always, true, prefs.extra_surround_enabled),
            (owned(DTS_AUDIO), prefs.dts_enabled, true),
            (
                owned(EXTRA_SURROUND_AUDIO),
                prefs.extra_surround_enabled,
                true,
            ),
        ];

        let mut direct_play = Vec::new();
        let mut channel_profiles = Vec::new();
        for (codecs, included, surround_allowed) in tiers {
            if !included {
                continue;
            }
            let ceiling = prefs.channel_ceiling(surround_allowed);
            channel_profiles.push(max_audio_channels_codec_profile(Some(&codecs), ceiling));
            direct_play.extend(codecs);
        }

        Self {
            direct_play,
            forced: None,
            channel_profiles,
        }
    }

    /// Audio list for a transcoding target; the forced codec wins over `defaults`.
    pub fn transcode(&self, defaults: &[&str]) -> Vec<String> {
        match &self.forced {
            Some(forced) => vec![forced.clone()],
            None => owned(defaults),
        }
    }

    /// Container for an audio-only transcode into the forced codec.
    pub fn music_container<'a>(&'a self, default: &'a str) -> &'a str {
        match self.forced.as_deref() {
            Some(audio::VORBIS) | Some(audio::OPUS) => audio::OGG,
            Some(forced) => forced,
            None => default,
        }
    }
}

/// Preferred video targets for a transcode into `container`, best first.
pub fn transcode_video_codecs(caps: &DeviceCapabilities, container: &str) -> Vec<String> {
    let hevc = hevc_codec_profile(caps)
        .is_some_and(|profile| profile.contains_codec(video::HEVC, container));
    let mut codecs = Vec::with_capacity(2);
    if hevc {
        codecs.push(video::HEVC.to_string());
    }
    codecs.push(video::H264.to_string());
    codecs
}

pub fn subtitle_profiles(table: &[(&str, SubtitleDeliveryMethod)]) -> Vec<SubtitleProfile> {
    table
        .iter()
        .map(|(format, method)| SubtitleProfile {
            format: format.to_string(),
            method: *method,
        })
        .collect()
}

/// Streaming ceiling in bits per second from the user's Mbps preference.
pub fn streaming_bitrate(prefs: &PlaybackPreferences, fallback: u64) -> u64 {
    prefs
        .max_bitrate_mbps
        .map(|mbps| u64::from(mbps) * 1_000_000)
        .unwrap_or(fallback)
}
