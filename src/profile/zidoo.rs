use tracing::{debug, instrument};

use crate::capabilities::DeviceCapabilities;
use crate::codec::{audio, container};
use crate::preferences::PlaybackPreferences;
use crate::profile::conditions::{avi_xvid_container_profile, h264_codec_profile, hevc_codec_profile};
use crate::profile::rules::{AudioPlan, streaming_bitrate, subtitle_profiles, transcode_video_codecs};
use crate::profile::tables::{HARDWARE_EXTRA_CONTAINERS, VIDEO_CONTAINERS, ZIDOO_SUBTITLES};
use crate::profile::{
    DEFAULT_MAX_STREAMING_BITRATE, DeviceProfile, DirectPlayProfile, DlnaProfileType,
    TranscodingProfile, owned,
};

pub const NAME: &str = "AndroidTV-Zidoo-External";

pub const MAX_STATIC_BITRATE: u64 = 120_000_000;
const HLS_SEGMENT_SECONDS: u32 = 20;
const VIDEO_TRANSCODE_CONTAINER: &str = container::TS;

/// Profile for the Zidoo hardware player launched as an external app.
/// Transcodes go out as HLS so the player can seek inside them.
#[instrument(skip_all, fields(player = NAME))]
pub fn build(prefs: &PlaybackPreferences, caps: &DeviceCapabilities) -> DeviceProfile {
    let audio_plan = AudioPlan::new(prefs, &[]);

    let mut profile = DeviceProfile::new(NAME);
    profile.max_static_bitrate = MAX_STATIC_BITRATE;
    profile.max_streaming_bitrate = streaming_bitrate(prefs, DEFAULT_MAX_STREAMING_BITRATE);

    let mut containers = owned(VIDEO_CONTAINERS);
    containers.extend(owned(HARDWARE_EXTRA_CONTAINERS));
    profile.direct_play_profiles = vec![DirectPlayProfile {
        profile_type: DlnaProfileType::Video,
        container: containers,
        audio_codec: audio_plan.direct_play.clone(),
        video_codec: Vec::new(),
    }];

    let mut video = TranscodingProfile::streaming(DlnaProfileType::Video, VIDEO_TRANSCODE_CONTAINER);
    video.video_codec = transcode_video_codecs(caps, VIDEO_TRANSCODE_CONTAINER);
    video.audio_codec = audio_plan.transcode(&[audio::AC3]);
    video.protocol = "hls".to_string();
    video.segment_length = Some(HLS_SEGMENT_SECONDS);
    video.enable_mpegts_m2_ts_mode = true;
    video.max_audio_channels = prefs.forced_channel_count.map(|c| c.to_string());

    let mut music =
        TranscodingProfile::streaming(DlnaProfileType::Audio, audio_plan.music_container(audio::MP3));
    music.audio_codec = audio_plan.transcode(&[audio::MP3]);

    profile.transcoding_profiles = vec![video, music];

    profile.codec_profiles = hevc_codec_profile(caps)
        .into_iter()
        .chain(std::iter::once(h264_codec_profile(caps)))
        .chain(audio_plan.channel_profiles)
        .collect();

    profile.container_profiles = vec![avi_xvid_container_profile()];
    profile.subtitle_profiles = subtitle_profiles(ZIDOO_SUBTITLES);

    debug!(
        hevc = caps.supports_hevc(),
        dts = prefs.dts_enabled,
        extra_surround = prefs.extra_surround_enabled,
        "Assembled Zidoo profile"
    );
    profile
}
