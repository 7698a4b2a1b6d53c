use tracing::{debug, instrument};

use crate::capabilities::DeviceCapabilities;
use crate::codec::{audio, container};
use crate::preferences::PlaybackPreferences;
use crate::profile::conditions::{avi_xvid_container_profile, h264_codec_profile, hevc_codec_profile};
use crate::profile::rules::{AudioPlan, streaming_bitrate, subtitle_profiles, transcode_video_codecs};
use crate::profile::tables::{LIBVLC_SUBTITLES, MUSIC_CONTAINERS, PHOTO_CONTAINERS, VIDEO_CONTAINERS};
use crate::profile::{
    DEFAULT_MAX_STREAMING_BITRATE, DeviceProfile, DirectPlayProfile, DlnaProfileType,
    TranscodingProfile, owned,
};

pub const NAME: &str = "AndroidTV-libVLC";

const VIDEO_TRANSCODE_CONTAINER: &str = container::MKV;
const VIDEO_TRANSCODE_AUDIO: &[&str] = &[audio::AAC, audio::MP3];

/// Profile for the in-app software player.
#[instrument(skip_all, fields(player = NAME))]
pub fn build(prefs: &PlaybackPreferences, caps: &DeviceCapabilities) -> DeviceProfile {
    // LATM-wrapped AAC only shows up on live broadcasts and cannot be downmixed.
    let live_extras: &[&str] = if prefs.is_live_tv && !prefs.downmix_audio {
        &[audio::AAC_LATM]
    } else {
        &[]
    };
    let audio_plan = AudioPlan::new(prefs, live_extras);

    let mut profile = DeviceProfile::new(NAME);
    profile.max_streaming_bitrate = streaming_bitrate(prefs, DEFAULT_MAX_STREAMING_BITRATE);

    profile.direct_play_profiles = vec![
        DirectPlayProfile {
            profile_type: DlnaProfileType::Video,
            container: owned(VIDEO_CONTAINERS),
            audio_codec: audio_plan.direct_play.clone(),
            video_codec: Vec::new(),
        },
        DirectPlayProfile {
            profile_type: DlnaProfileType::Audio,
            container: owned(MUSIC_CONTAINERS),
            audio_codec: audio_plan.forced.iter().cloned().collect(),
            video_codec: Vec::new(),
        },
        DirectPlayProfile {
            profile_type: DlnaProfileType::Photo,
            container: owned(PHOTO_CONTAINERS),
            audio_codec: Vec::new(),
            video_codec: Vec::new(),
        },
    ];

    let mut video = TranscodingProfile::streaming(DlnaProfileType::Video, VIDEO_TRANSCODE_CONTAINER);
    video.video_codec = transcode_video_codecs(caps, VIDEO_TRANSCODE_CONTAINER);
    video.audio_codec = audio_plan.transcode(VIDEO_TRANSCODE_AUDIO);
    video.copy_timestamps = true;
    video.max_audio_channels = prefs.forced_channel_count.map(|c| c.to_string());

    let mut music =
        TranscodingProfile::streaming(DlnaProfileType::Audio, audio_plan.music_container(audio::FLAC));
    music.audio_codec = audio_plan.transcode(&[audio::FLAC]);

    profile.transcoding_profiles = vec![video, music];

    profile.codec_profiles = hevc_codec_profile(caps)
        .into_iter()
        .chain(std::iter::once(h264_codec_profile(caps)))
        .chain(audio_plan.channel_profiles)
        .collect();

    profile.container_profiles = vec![avi_xvid_container_profile()];
    profile.subtitle_profiles = subtitle_profiles(LIBVLC_SUBTITLES);

    debug!(
        direct_play_audio = profile.direct_play_profiles[0].audio_codec.len(),
        codec_profiles = profile.codec_profiles.len(),
        "Assembled libVLC profile"
    );
    profile
}
