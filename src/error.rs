use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown player '{name}'. Available players: {available}")]
    UnknownPlayer { name: String, available: String },
    #[error("Unknown image role '{0}'")]
    UnknownImageRole(String),
    #[error("Unknown audio codec '{0}'. Expected one of: none, ac3, aac, flac, mp3, opus, vorbis")]
    UnknownAudioCodec(String),
}
