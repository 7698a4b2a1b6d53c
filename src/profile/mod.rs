//! Device profile model exchanged with the media server.
//!
//! Field names serialize in the server's PascalCase contract and every
//! identifier list travels as one comma-joined string, so a profile built
//! here can be posted as-is with a playback-info request.

pub mod conditions;
pub mod libvlc;
pub mod rules;
pub mod tables;
pub mod zidoo;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const DEFAULT_MAX_STATIC_BITRATE: u64 = 100_000_000;
pub const DEFAULT_MAX_STREAMING_BITRATE: u64 = 20_000_000;
pub const DEFAULT_MUSIC_TRANSCODING_BITRATE: u64 = 128_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DlnaProfileType {
    Audio,
    Video,
    Photo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecType {
    Video,
    VideoAudio,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileConditionType {
    Equals,
    NotEquals,
    LessThanEqual,
    GreaterThanEqual,
    EqualsAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileConditionValue {
    AudioChannels,
    AudioBitrate,
    AudioProfile,
    Width,
    Height,
    VideoBitDepth,
    VideoBitrate,
    VideoFramerate,
    VideoLevel,
    VideoProfile,
    VideoCodecTag,
    IsAnamorphic,
    IsInterlaced,
    RefFrames,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingContext {
    Streaming,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtitleDeliveryMethod {
    Encode,
    Embed,
    External,
    Hls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileCondition {
    pub condition: ProfileConditionType,
    pub property: ProfileConditionValue,
    pub value: String,
    #[serde(default)]
    pub is_required: bool,
}

impl ProfileCondition {
    pub fn new(
        condition: ProfileConditionType,
        property: ProfileConditionValue,
        value: impl Into<String>,
    ) -> Self {
        Self {
            condition,
            property,
            value: value.into(),
            is_required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodecProfile {
    #[serde(rename = "Type")]
    pub codec_type: CodecType,
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub codec: Vec<String>,
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub container: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<ProfileCondition>,
}

impl CodecProfile {
    /// Whether this profile applies to `codec` inside `container`. An empty
    /// codec or container list matches everything.
    pub fn contains_codec(&self, codec: &str, container: &str) -> bool {
        let codec_matches = self.codec.is_empty() || self.codec.iter().any(|c| c == codec);
        let container_matches =
            self.container.is_empty() || self.container.iter().any(|c| c == container);
        codec_matches && container_matches
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerProfile {
    #[serde(rename = "Type")]
    pub profile_type: DlnaProfileType,
    #[serde(default, with = "comma_list")]
    pub container: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<ProfileCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectPlayProfile {
    #[serde(rename = "Type")]
    pub profile_type: DlnaProfileType,
    #[serde(default, with = "comma_list")]
    pub container: Vec<String>,
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub audio_codec: Vec<String>,
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub video_codec: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscodingProfile {
    #[serde(rename = "Type")]
    pub profile_type: DlnaProfileType,
    pub container: String,
    #[serde(default, with = "comma_list", skip_serializing_if = "Vec::is_empty")]
    pub video_codec: Vec<String>,
    #[serde(default, with = "comma_list")]
    pub audio_codec: Vec<String>,
    pub context: EncodingContext,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub copy_timestamps: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_audio_channels: Option<String>,
    #[serde(default)]
    pub enable_mpegts_m2_ts_mode: bool,
}

fn default_protocol() -> String {
    "http".to_string()
}

impl TranscodingProfile {
    pub fn streaming(profile_type: DlnaProfileType, container: &str) -> Self {
        Self {
            profile_type,
            container: container.to_string(),
            video_codec: Vec::new(),
            audio_codec: Vec::new(),
            context: EncodingContext::Streaming,
            protocol: default_protocol(),
            copy_timestamps: false,
            segment_length: None,
            max_audio_channels: None,
            enable_mpegts_m2_ts_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubtitleProfile {
    pub format: String,
    pub method: SubtitleDeliveryMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceProfile {
    pub name: String,
    pub max_static_bitrate: u64,
    pub max_streaming_bitrate: u64,
    pub music_streaming_transcoding_bitrate: u64,
    #[serde(default)]
    pub direct_play_profiles: Vec<DirectPlayProfile>,
    #[serde(default)]
    pub transcoding_profiles: Vec<TranscodingProfile>,
    #[serde(default)]
    pub codec_profiles: Vec<CodecProfile>,
    #[serde(default)]
    pub container_profiles: Vec<ContainerProfile>,
    #[serde(default)]
    pub subtitle_profiles: Vec<SubtitleProfile>,
}

impl DeviceProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_static_bitrate: DEFAULT_MAX_STATIC_BITRATE,
            max_streaming_bitrate: DEFAULT_MAX_STREAMING_BITRATE,
            music_streaming_transcoding_bitrate: DEFAULT_MUSIC_TRANSCODING_BITRATE,
            direct_play_profiles: Vec::new(),
            transcoding_profiles: Vec::new(),
            codec_profiles: Vec::new(),
            container_profiles: Vec::new(),
            subtitle_profiles: Vec::new(),
        }
    }

    pub fn direct_play(&self, profile_type: DlnaProfileType) -> Option<&DirectPlayProfile> {
        self.direct_play_profiles
            .iter()
            .find(|p| p.profile_type == profile_type)
    }

    pub fn transcoding(&self, profile_type: DlnaProfileType) -> Option<&TranscodingProfile> {
        self.transcoding_profiles
            .iter()
            .find(|p| p.profile_type == profile_type)
    }

    /// SHA-256 over the canonical JSON form; stable for equal profiles.
    pub fn fingerprint(&self) -> String {
        let serialized = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&serialized);
        format!("{:x}", hasher.finalize())
    }
}

/// Collects `&str` slices into the owned lists the model stores.
pub(crate) fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&values.join(","))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect())
    }

    #[cfg(test)]
    mod tests {
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Wrapper {
            #[serde(with = "super")]
            list: Vec<String>,
        }

        #[test]
        fn joins_with_commas() {
            let wrapper = Wrapper {
                list: vec!["mkv".into(), "mp4".into()],
            };
            let json = serde_json::to_string(&wrapper).unwrap();
            assert_eq!(json, r#"{"list":"mkv,mp4"}"#);
        }

        #[test]
        fn splits_and_drops_empty_tokens() {
            let parsed: Wrapper = serde_json::from_str(r#"{"list":"mkv, ,mp4,"}"#).unwrap();
            assert_eq!(parsed.list, vec!["mkv", "mp4"]);
            let null: Wrapper = serde_json::from_str(r#"{"list":null}"#).unwrap();
            assert!(null.list.is_empty());
        }
    }
}
