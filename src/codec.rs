//! Identifier vocabulary shared by every profile rule.
//!
//! Tokens are the exact lowercase strings the media server uses in its
//! profile contract. Nothing here validates what the server will accept;
//! the lists only exist so builders and the linter agree on spelling.

pub mod container {
    pub const M4V: &str = "m4v";
    pub const THREE_GP: &str = "3gp";
    pub const TS: &str = "ts";
    pub const MPEGTS: &str = "mpegts";
    pub const MOV: &str = "mov";
    pub const XVID: &str = "xvid";
    pub const VOB: &str = "vob";
    pub const MKV: &str = "mkv";
    pub const WMV: &str = "wmv";
    pub const ASF: &str = "asf";
    pub const OGM: &str = "ogm";
    pub const OGV: &str = "ogv";
    pub const M2V: &str = "m2v";
    pub const AVI: &str = "avi";
    pub const MPG: &str = "mpg";
    pub const MPEG: &str = "mpeg";
    pub const MP4: &str = "mp4";
    pub const WEBM: &str = "webm";
    pub const DVR_MS: &str = "dvr-ms";
    pub const WTV: &str = "wtv";
    pub const MP3: &str = "mp3";
    pub const AAC: &str = "aac";
    pub const AC3: &str = "ac3";
    pub const FLAC: &str = "flac";
    pub const OGG: &str = "ogg";

    pub const JPG: &str = "jpg";
    pub const JPEG: &str = "jpeg";
    pub const PNG: &str = "png";
    pub const GIF: &str = "gif";
    pub const WEBP: &str = "webp";

    pub const ALL: &[&str] = &[
        M4V, THREE_GP, TS, MPEGTS, MOV, XVID, VOB, MKV, WMV, ASF, OGM, OGV, M2V, AVI, MPG, MPEG,
        MP4, WEBM, DVR_MS, WTV, MP3, AAC, AC3, FLAC, OGG, JPG, JPEG, PNG, GIF, WEBP,
    ];
}

pub mod video {
    pub const H264: &str = "h264";
    pub const HEVC: &str = "hevc";
    pub const VP8: &str = "vp8";
    pub const VP9: &str = "vp9";
    pub const AV1: &str = "av1";
    pub const MPEG2VIDEO: &str = "mpeg2video";
    pub const MPEG4: &str = "mpeg4";
    pub const VC1: &str = "vc1";

    pub const ALL: &[&str] = &[H264, HEVC, VP8, VP9, AV1, MPEG2VIDEO, MPEG4, VC1];
}

pub mod audio {
    pub const AAC: &str = "aac";
    pub const AAC_LATM: &str = "aac_latm";
    pub const AC3: &str = "ac3";
    pub const APE: &str = "ape";
    pub const DCA: &str = "dca";
    pub const DSD_LSBF: &str = "dsd_lsbf";
    pub const DSD_MSBF: &str = "dsd_msbf";
    pub const DTS: &str = "dts";
    pub const EAC3: &str = "eac3";
    pub const FLAC: &str = "flac";
    pub const MLP: &str = "mlp";
    pub const MP2: &str = "mp2";
    pub const MP3: &str = "mp3";
    pub const MPA: &str = "mpa";
    pub const OGA: &str = "oga";
    pub const OGG: &str = "ogg";
    pub const OPUS: &str = "opus";
    pub const PCM: &str = "pcm";
    pub const PCM_S16LE: &str = "pcm_s16le";
    pub const PCM_S24LE: &str = "pcm_s24le";
    pub const SPX: &str = "spx";
    pub const TRUEHD: &str = "truehd";
    pub const VORBIS: &str = "vorbis";
    pub const WAV: &str = "wav";
    pub const WEBMA: &str = "webma";
    pub const WMA: &str = "wma";
    pub const WMAV2: &str = "wmav2";

    pub const ALL: &[&str] = &[
        AAC, AAC_LATM, AC3, APE, DCA, DSD_LSBF, DSD_MSBF, DTS, EAC3, FLAC, MLP, MP2, MP3, MPA, OGA,
        OGG, OPUS, PCM, PCM_S16LE, PCM_S24LE, SPX, TRUEHD, VORBIS, WAV, WEBMA, WMA, WMAV2,
    ];
}

pub mod subtitle {
    pub const ASS: &str = "ass";
    pub const DVDSUB: &str = "dvdsub";
    pub const IDX: &str = "idx";
    pub const PGS: &str = "pgs";
    pub const PGSSUB: &str = "pgssub";
    pub const SMI: &str = "smi";
    pub const SRT: &str = "srt";
    pub const SSA: &str = "ssa";
    pub const SUB: &str = "sub";
    pub const SUBRIP: &str = "subrip";
    pub const VTT: &str = "vtt";

    pub const ALL: &[&str] = &[ASS, DVDSUB, IDX, PGS, PGSSUB, SMI, SRT, SSA, SUB, SUBRIP, VTT];
}

/// Which vocabulary a token is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Container,
    Video,
    Audio,
    Subtitle,
}

/// Case-sensitive membership test. Audio codecs double as audio-only
/// containers, so containers also accept audio tokens.
pub fn is_known(kind: TokenKind, token: &str) -> bool {
    match kind {
        TokenKind::Container => container::ALL.contains(&token) || audio::ALL.contains(&token),
        TokenKind::Video => video::ALL.contains(&token),
        TokenKind::Audio => audio::ALL.contains(&token),
        TokenKind::Subtitle => subtitle::ALL.contains(&token),
    }
}
