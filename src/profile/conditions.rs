use crate::capabilities::DeviceCapabilities;
use crate::codec::{container, video};
use crate::profile::{
    CodecProfile, CodecType, ContainerProfile, DlnaProfileType, ProfileCondition,
    ProfileConditionType, ProfileConditionValue,
};

pub fn hevc_video_profile_condition(caps: &DeviceCapabilities) -> ProfileCondition {
    let mut profiles = vec!["main"];
    if caps.supports_hevc_main10() {
        profiles.push("main 10");
    }
    ProfileCondition::new(
        ProfileConditionType::EqualsAny,
        ProfileConditionValue::VideoProfile,
        profiles.join("|"),
    )
}

pub fn h264_video_profile_condition(caps: &DeviceCapabilities) -> ProfileCondition {
    let mut profiles = vec!["main", "high", "baseline", "constrained baseline"];
    if caps.supports_avc_high10() {
        profiles.push("high 10");
    }
    ProfileCondition::new(
        ProfileConditionType::EqualsAny,
        ProfileConditionValue::VideoProfile,
        profiles.join("|"),
    )
}

pub fn h264_video_level_condition(caps: &DeviceCapabilities) -> ProfileCondition {
    ProfileCondition::new(
        ProfileConditionType::LessThanEqual,
        ProfileConditionValue::VideoLevel,
        caps.family.h264_level_ceiling(),
    )
}

pub fn max_resolution_conditions(width: u32, height: u32) -> [ProfileCondition; 2] {
    [
        ProfileCondition::new(
            ProfileConditionType::LessThanEqual,
            ProfileConditionValue::Width,
            width.to_string(),
        ),
        ProfileCondition::new(
            ProfileConditionType::LessThanEqual,
            ProfileConditionValue::Height,
            height.to_string(),
        ),
    ]
}

/// HEVC constraints, present only when the device decodes HEVC at all.
pub fn hevc_codec_profile(caps: &DeviceCapabilities) -> Option<CodecProfile> {
    caps.supports_hevc().then(|| CodecProfile {
        codec_type: CodecType::Video,
        codec: vec![video::HEVC.to_string()],
        container: Vec::new(),
        conditions: vec![hevc_video_profile_condition(caps)],
    })
}

pub fn h264_codec_profile(caps: &DeviceCapabilities) -> CodecProfile {
    let mut conditions = vec![
        h264_video_profile_condition(caps),
        h264_video_level_condition(caps),
    ];
    if caps.family.is_low_power() {
        conditions.extend(max_resolution_conditions(1920, 1080));
    }
    CodecProfile {
        codec_type: CodecType::Video,
        codec: vec![video::H264.to_string()],
        container: Vec::new(),
        conditions,
    }
}

pub fn max_audio_channels_codec_profile(codecs: Option<&[String]>, channels: u32) -> CodecProfile {
    CodecProfile {
        codec_type: CodecType::VideoAudio,
        codec: codecs.map(<[String]>::to_vec).unwrap_or_default(),
        container: Vec::new(),
        conditions: vec![ProfileCondition::new(
            ProfileConditionType::LessThanEqual,
            ProfileConditionValue::AudioChannels,
            channels.to_string(),
        )],
    }
}

/// Rejects AVI files whose video stream carries an Xvid tag.
pub fn avi_xvid_container_profile() -> ContainerProfile {
    ContainerProfile {
        profile_type: DlnaProfileType::Video,
        container: vec![container::AVI.to_string()],
        conditions: vec![ProfileCondition::new(
            ProfileConditionType::NotEquals,
            ProfileConditionValue::VideoCodecTag,
            container::XVID,
        )],
    }
}
