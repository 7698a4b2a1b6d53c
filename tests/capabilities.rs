use std::fs;

use leanback_profiles::capabilities::{
    DecoderInfo, DecoderInventory, DeviceCapabilities, DeviceFamily,
};
use leanback_profiles::profile::conditions::{
    h264_video_level_condition, h264_video_profile_condition, hevc_codec_profile,
    hevc_video_profile_condition, max_audio_channels_codec_profile,
};
use leanback_profiles::profile::{CodecType, ProfileConditionType, ProfileConditionValue};
use tempfile::tempdir;

struct Broken;

impl DecoderInventory for Broken {
    fn decoders(&self) -> Option<Vec<DecoderInfo>> {
        None
    }
}

#[test]
fn missing_inventory_means_unsupported() {
    let caps = DeviceCapabilities::probe(&Broken, DeviceFamily::ShieldTv);
    assert!(!caps.supports_hevc());
    assert!(!caps.supports_hevc_main10());
    assert!(!caps.supports_avc_high10());
    assert_eq!(caps.family, DeviceFamily::ShieldTv);
}

#[test]
fn probe_reads_profiles_per_mime() {
    let decoders = vec![
        DecoderInfo::new("video/hevc", &["Main"]),
        DecoderInfo::new("video/avc", &["high10"]),
    ];
    let caps = DeviceCapabilities::probe(&decoders, DeviceFamily::Generic);
    assert!(caps.supports_hevc());
    assert!(!caps.supports_hevc_main10());
    assert!(caps.supports_avc_high10());
}

#[test]
fn main10_without_hevc_is_not_reported() {
    let caps = DeviceCapabilities {
        hevc: false,
        hevc_main10: true,
        ..DeviceCapabilities::default()
    };
    assert!(!caps.supports_hevc_main10());
}

#[test]
fn families_resolve_from_model_strings() {
    assert_eq!(DeviceFamily::from_model("Amazon", "AFTMM"), DeviceFamily::FireTvStick4k);
    assert_eq!(DeviceFamily::from_model("Amazon", "AFTS"), DeviceFamily::FireTvGen2);
    assert_eq!(DeviceFamily::from_model("Amazon", "AFTT"), DeviceFamily::FireTv);
    assert_eq!(DeviceFamily::from_model("NVIDIA", "SHIELD Android TV"), DeviceFamily::ShieldTv);
    assert_eq!(DeviceFamily::from_model("ZIDOO", "Z9X"), DeviceFamily::ZidooRtk);
    assert_eq!(DeviceFamily::from_model("Google", "Chromecast"), DeviceFamily::Generic);
}

#[test]
fn level_ceiling_tracks_family() {
    let level = |family| {
        h264_video_level_condition(&DeviceCapabilities {
            family,
            ..DeviceCapabilities::default()
        })
    };
    assert_eq!(level(DeviceFamily::FireTvStick4k).value, "52");
    assert_eq!(level(DeviceFamily::FireTv).value, "41");
    let generic = level(DeviceFamily::Generic);
    assert_eq!(generic.value, "51");
    assert_eq!(generic.condition, ProfileConditionType::LessThanEqual);
    assert_eq!(generic.property, ProfileConditionValue::VideoLevel);
}

#[test]
fn video_profile_conditions_grow_with_capabilities() {
    let none = DeviceCapabilities::default();
    assert_eq!(hevc_video_profile_condition(&none).value, "main");
    assert_eq!(
        h264_video_profile_condition(&none).value,
        "main|high|baseline|constrained baseline"
    );
    assert!(hevc_codec_profile(&none).is_none());

    let all = DeviceCapabilities {
        hevc: true,
        hevc_main10: true,
        avc_high10: true,
        ..DeviceCapabilities::default()
    };
    let hevc = hevc_video_profile_condition(&all);
    assert_eq!(hevc.condition, ProfileConditionType::EqualsAny);
    assert_eq!(hevc.value, "main|main 10");
    assert!(h264_video_profile_condition(&all).value.ends_with("|high 10"));
    let profile = hevc_codec_profile(&all).unwrap();
    assert!(profile.contains_codec("hevc", "mkv"));
    assert!(!profile.contains_codec("h264", "mkv"));
}

#[test]
fn channel_profile_is_optionally_scoped() {
    let unscoped = max_audio_channels_codec_profile(None, 6);
    assert_eq!(unscoped.codec_type, CodecType::VideoAudio);
    assert!(unscoped.codec.is_empty());
    assert_eq!(unscoped.conditions[0].value, "6");
    assert_eq!(unscoped.conditions[0].property, ProfileConditionValue::AudioChannels);

    let codecs = vec!["ac3".to_string(), "eac3".to_string()];
    let scoped = max_audio_channels_codec_profile(Some(&codecs), 8);
    assert_eq!(scoped.codec, codecs);
}

#[test]
fn capability_file_round_trip() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("device.yaml");
    fs::write(
        &path,
        r#"manufacturer: Amazon
model: AFTMM
decoders:
  - mime: video/hevc
    profiles: [main, main10]
  - mime: video/avc
    profiles: [high]
"#,
    )
    .unwrap();

    let caps = DeviceCapabilities::load(&path).unwrap();
    assert_eq!(caps.family, DeviceFamily::FireTvStick4k);
    assert!(caps.supports_hevc_main10());
    assert!(!caps.supports_avc_high10());

    let blind = temp.path().join("blind.yaml");
    fs::write(&blind, "model: AFTT\n").unwrap();
    let caps = DeviceCapabilities::load(&blind).unwrap();
    assert!(!caps.supports_hevc());
    assert_eq!(caps.family, DeviceFamily::FireTv);
}

#[test]
fn capability_file_mime_is_case_insensitive() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("device.yaml");
    fs::write(
        &path,
        "model: SHIELD Android TV\ndecoders:\n  - mime: video/HEVC\n    profiles: [Main10]\n  - mime: Video/AVC\n    profiles: [High10]\n",
    )
    .unwrap();

    let caps = DeviceCapabilities::load(&path).unwrap();
    assert!(caps.supports_hevc());
    assert!(caps.supports_hevc_main10());
    assert!(caps.supports_avc_high10());
}

#[test]
fn detection_is_memoized() {
    let first = DeviceCapabilities::detect();
    let second = DeviceCapabilities::detect();
    assert!(std::ptr::eq(first, second));
}
