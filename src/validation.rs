use std::collections::HashSet;

use serde::Serialize;

use crate::codec::{TokenKind, is_known};
use crate::profile::{
    DeviceProfile, DlnaProfileType, ProfileConditionType, SubtitleDeliveryMethod,
};

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

pub fn validate_profile(profile: &DeviceProfile) -> ValidationReport {
    let mut report = ValidationReport::default();

    if profile.name.trim().is_empty() {
        report.errors.push("Profile name cannot be empty".into());
    }

    if profile.max_streaming_bitrate > profile.max_static_bitrate {
        report.warnings.push(format!(
            "Streaming bitrate {} exceeds static bitrate {}",
            profile.max_streaming_bitrate, profile.max_static_bitrate
        ));
    }

    if profile.direct_play_profiles.is_empty() && profile.transcoding_profiles.is_empty() {
        report
            .errors
            .push("Profile declares neither direct play nor transcoding targets".into());
    }

    report.merge(validate_direct_play(profile));
    report.merge(validate_transcoding(profile));
    report.merge(validate_conditions(profile));
    report.merge(validate_subtitles(profile));

    report
}

fn validate_direct_play(profile: &DeviceProfile) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (idx, direct) in profile.direct_play_profiles.iter().enumerate() {
        if direct.container.is_empty() {
            report.errors.push(format!(
                "Direct play profile {} ({:?}) lists no containers",
                idx + 1,
                direct.profile_type
            ));
        }
        if direct.profile_type == DlnaProfileType::Video && direct.audio_codec.is_empty() {
            report.warnings.push(format!(
                "Direct play profile {} accepts any audio codec",
                idx + 1
            ));
        }
        warn_unknown(&mut report, TokenKind::Container, &direct.container);
        warn_unknown(&mut report, TokenKind::Audio, &direct.audio_codec);
        warn_unknown(&mut report, TokenKind::Video, &direct.video_codec);
    }
    report
}

fn validate_transcoding(profile: &DeviceProfile) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (idx, transcode) in profile.transcoding_profiles.iter().enumerate() {
        if transcode.container.trim().is_empty() {
            report
                .errors
                .push(format!("Transcoding profile {} has no container", idx + 1));
        }
        if transcode.profile_type == DlnaProfileType::Video && transcode.video_codec.is_empty() {
            report.errors.push(format!(
                "Video transcoding profile {} lists no video codecs",
                idx + 1
            ));
        }
        if transcode.audio_codec.is_empty() {
            report.errors.push(format!(
                "Transcoding profile {} lists no audio codecs",
                idx + 1
            ));
        }
        if transcode.segment_length.is_some() && transcode.protocol != "hls" {
            report.warnings.push(format!(
                "Transcoding profile {} sets a segment length without HLS",
                idx + 1
            ));
        }
        warn_unknown(&mut report, TokenKind::Container, std::slice::from_ref(&transcode.container));
        warn_unknown(&mut report, TokenKind::Video, &transcode.video_codec);
        warn_unknown(&mut report, TokenKind::Audio, &transcode.audio_codec);
    }
    report
}

fn validate_conditions(profile: &DeviceProfile) -> ValidationReport {
    let mut report = ValidationReport::default();
    let codec_conditions = profile
        .codec_profiles
        .iter()
        .flat_map(|p| p.conditions.iter());
    let container_conditions = profile
        .container_profiles
        .iter()
        .flat_map(|p| p.conditions.iter());

    for condition in codec_conditions.chain(container_conditions) {
        if condition.value.trim().is_empty() {
            report.errors.push(format!(
                "{:?} condition on {:?} has an empty value",
                condition.condition, condition.property
            ));
        } else if condition.condition == ProfileConditionType::EqualsAny
            && condition.value.split('|').any(|v| v.trim().is_empty())
        {
            report.errors.push(format!(
                "EqualsAny condition on {:?} contains an empty alternative",
                condition.property
            ));
        }
    }

    for (idx, container) in profile.container_profiles.iter().enumerate() {
        if container.container.is_empty() {
            report
                .errors
                .push(format!("Container profile {} names no container", idx + 1));
        }
    }
    report
}

fn validate_subtitles(profile: &DeviceProfile) -> ValidationReport {
    let mut report = ValidationReport::default();
    let has_hls = profile
        .transcoding_profiles
        .iter()
        .any(|t| t.protocol == "hls");
    let mut seen = HashSet::new();
    let mut external_seen = HashSet::new();

    for subtitle in &profile.subtitle_profiles {
        if !seen.insert((subtitle.format.as_str(), subtitle.method)) {
            report.warnings.push(format!(
                "Subtitle format '{}' listed twice with {:?}",
                subtitle.format, subtitle.method
            ));
        }
        match subtitle.method {
            SubtitleDeliveryMethod::External => {
                external_seen.insert(subtitle.format.as_str());
            }
            SubtitleDeliveryMethod::Embed if external_seen.contains(subtitle.format.as_str()) => {
                report.warnings.push(format!(
                    "Subtitle format '{}' prefers external delivery over embedding",
                    subtitle.format
                ));
            }
            SubtitleDeliveryMethod::Hls if !has_hls => {
                report.warnings.push(format!(
                    "Subtitle format '{}' uses HLS delivery but no transcoding profile streams HLS",
                    subtitle.format
                ));
            }
            _ => {}
        }
        warn_unknown(
            &mut report,
            TokenKind::Subtitle,
            std::slice::from_ref(&subtitle.format),
        );
    }
    report
}

fn warn_unknown(report: &mut ValidationReport, kind: TokenKind, tokens: &[String]) {
    for token in tokens {
        if !is_known(kind, token) {
            report
                .warnings
                .push(format!("Unrecognized {kind:?} identifier '{token}'"));
        }
    }
}
