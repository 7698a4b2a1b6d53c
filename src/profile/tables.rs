//! Static codec tiers and per-player format lists.

use crate::codec::{audio, container, subtitle};
use crate::profile::SubtitleDeliveryMethod::{self, Embed, External};

/// Decoded by every player family regardless of preferences.
pub const ALWAYS_AUDIO: &[&str] = &[
    audio::AAC,
    audio::MP3,
    audio::MP2,
    audio::AC3,
    audio::WMA,
    audio::WMAV2,
    audio::PCM,
    audio::PCM_S16LE,
    audio::PCM_S24LE,
    audio::OPUS,
    audio::FLAC,
    audio::VORBIS,
];

pub const DTS_AUDIO: &[&str] = &[audio::DCA, audio::DTS];

pub const EXTRA_SURROUND_AUDIO: &[&str] = &[
    audio::EAC3,
    audio::TRUEHD,
    audio::MLP,
    audio::DSD_LSBF,
    audio::DSD_MSBF,
];

pub const VIDEO_CONTAINERS: &[&str] = &[
    container::M4V,
    container::THREE_GP,
    container::TS,
    container::MPEGTS,
    container::MOV,
    container::XVID,
    container::VOB,
    container::MKV,
    container::WMV,
    container::ASF,
    container::OGM,
    container::OGV,
    container::M2V,
    container::AVI,
    container::MPG,
    container::MPEG,
    container::MP4,
    container::WEBM,
    container::WTV,
];

/// Hardware players additionally read recorded-TV containers.
pub const HARDWARE_EXTRA_CONTAINERS: &[&str] = &[container::DVR_MS];

pub const MUSIC_CONTAINERS: &[&str] = &[
    audio::APE,
    audio::AAC,
    audio::FLAC,
    audio::MP2,
    audio::MP3,
    audio::MPA,
    audio::OGA,
    audio::OGG,
    audio::OPUS,
    audio::SPX,
    audio::PCM,
    audio::WAV,
    audio::WEBMA,
    audio::WMA,
];

pub const PHOTO_CONTAINERS: &[&str] = &[
    container::JPG,
    container::JPEG,
    container::PNG,
    container::GIF,
    container::WEBP,
];

pub const LIBVLC_SUBTITLES: &[(&str, SubtitleDeliveryMethod)] = &[
    (subtitle::SRT, Embed),
    (subtitle::SRT, External),
    (subtitle::SUBRIP, Embed),
    (subtitle::ASS, Embed),
    (subtitle::SSA, Embed),
    (subtitle::PGS, Embed),
    (subtitle::PGSSUB, Embed),
    (subtitle::DVDSUB, Embed),
    (subtitle::VTT, Embed),
    (subtitle::SUB, Embed),
    (subtitle::SMI, Embed),
    (subtitle::IDX, Embed),
];

pub const ZIDOO_SUBTITLES: &[(&str, SubtitleDeliveryMethod)] = &[
    (subtitle::SRT, Embed),
    (subtitle::SUBRIP, Embed),
    (subtitle::ASS, Embed),
    (subtitle::SSA, Embed),
    (subtitle::PGS, Embed),
    (subtitle::PGSSUB, Embed),
    (subtitle::DVDSUB, Embed),
    (subtitle::VTT, Embed),
    (subtitle::SUB, Embed),
    (subtitle::IDX, Embed),
    (subtitle::SMI, Embed),
];
