//! Library item model and image URL resolution.
//!
//! Items are consumed exactly as the server returns them (PascalCase DTO
//! fields); nothing here ever mutates an item.

pub mod endpoint;
pub mod resolver;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub use resolver::{ImageQuery, ImageResolver};
pub use endpoint::ImageUrlBuilder;

pub const ASPECT_RATIO_POSTER: f64 = 2.0 / 3.0;
pub const ASPECT_RATIO_POSTER_WIDE: f64 = 7.0 / 9.0;
pub const ASPECT_RATIO_THUMB: f64 = 16.0 / 9.0;
pub const ASPECT_RATIO_BANNER: f64 = 1000.0 / 185.0;
pub const ASPECT_RATIO_SQUARE: f64 = 1.0;

pub const MAX_PRIMARY_IMAGE_HEIGHT: u32 = 370;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ImageRole {
    Primary,
    Art,
    Backdrop,
    Banner,
    Logo,
    Thumb,
    Disc,
    Box,
    BoxRear,
    Screenshot,
    Menu,
    Chapter,
    Profile,
}

impl ImageRole {
    pub const ALL: [ImageRole; 13] = [
        ImageRole::Primary,
        ImageRole::Art,
        ImageRole::Backdrop,
        ImageRole::Banner,
        ImageRole::Logo,
        ImageRole::Thumb,
        ImageRole::Disc,
        ImageRole::Box,
        ImageRole::BoxRear,
        ImageRole::Screenshot,
        ImageRole::Menu,
        ImageRole::Chapter,
        ImageRole::Profile,
    ];

    /// Name used by the server in paths and tag maps.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageRole::Primary => "Primary",
            ImageRole::Art => "Art",
            ImageRole::Backdrop => "Backdrop",
            ImageRole::Banner => "Banner",
            ImageRole::Logo => "Logo",
            ImageRole::Thumb => "Thumb",
            ImageRole::Disc => "Disc",
            ImageRole::Box => "Box",
            ImageRole::BoxRear => "BoxRear",
            ImageRole::Screenshot => "Screenshot",
            ImageRole::Menu => "Menu",
            ImageRole::Chapter => "Chapter",
            ImageRole::Profile => "Profile",
        }
    }
}

impl FromStr for ImageRole {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ImageRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownImageRole(wanted.to_string()))
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ImageFormat {
    Webp,
    Jpg,
    Png,
    Gif,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Webp => "Webp",
            ImageFormat::Jpg => "Jpg",
            ImageFormat::Png => "Png",
            ImageFormat::Gif => "Gif",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Episode,
    Season,
    Series,
    Movie,
    Audio,
    MusicAlbum,
    MusicArtist,
    Program,
    Channel,
    TvChannel,
    UserView,
    CollectionFolder,
    Folder,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ItemKind {
    pub fn is_channel(self) -> bool {
        matches!(self, ItemKind::Channel | ItemKind::TvChannel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlbumArtist {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The subset of the server's item DTO that image resolution reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LibraryItem {
    pub id: String,
    #[serde(rename = "Type")]
    pub kind: ItemKind,
    pub image_tags: BTreeMap<ImageRole, String>,
    pub backdrop_image_tags: Vec<String>,
    pub parent_primary_image_item_id: Option<String>,
    pub parent_primary_image_tag: Option<String>,
    pub parent_thumb_item_id: Option<String>,
    pub parent_thumb_image_tag: Option<String>,
    pub parent_backdrop_item_id: Option<String>,
    pub parent_backdrop_image_tags: Vec<String>,
    pub parent_art_item_id: Option<String>,
    pub parent_art_image_tag: Option<String>,
    pub parent_logo_item_id: Option<String>,
    pub parent_logo_image_tag: Option<String>,
    pub series_id: Option<String>,
    pub series_primary_image_tag: Option<String>,
    pub series_thumb_image_tag: Option<String>,
    pub season_id: Option<String>,
    pub album_id: Option<String>,
    pub album_primary_image_tag: Option<String>,
    pub album_artists: Vec<AlbumArtist>,
    pub channel_id: Option<String>,
    pub channel_primary_image_tag: Option<String>,
    pub primary_image_aspect_ratio: Option<f64>,
    pub has_primary_image: bool,
}

impl LibraryItem {
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    /// The item's own tag for `role`, ignoring empty strings.
    pub fn image_tag(&self, role: ImageRole) -> Option<&str> {
        non_empty(self.image_tags.get(&role).map(String::as_str))
    }

    pub fn first_backdrop_tag(&self) -> Option<&str> {
        non_empty(self.backdrop_image_tags.first().map(String::as_str))
    }

    /// Series tag used when an episode borrows its series artwork.
    pub fn series_image_tag(&self, role: ImageRole) -> Option<&str> {
        match role {
            ImageRole::Primary => non_empty(self.series_primary_image_tag.as_deref()),
            ImageRole::Thumb => non_empty(self.series_thumb_image_tag.as_deref()),
            _ => None,
        }
    }

    pub fn episode_series_id(&self) -> Option<&str> {
        match self.kind {
            ItemKind::Episode => non_empty(self.series_id.as_deref()),
            _ => None,
        }
    }

    pub fn episode_season_id(&self) -> Option<&str> {
        match self.kind {
            ItemKind::Episode => non_empty(self.season_id.as_deref()),
            _ => None,
        }
    }
}

/// Card aspect ratio for an item. Falls back to a wide poster when the
/// server reports no primary ratio.
pub fn image_aspect_ratio(item: &LibraryItem) -> f64 {
    if item.kind == ItemKind::Episode {
        if let Some(ratio) = item.primary_image_aspect_ratio {
            return ratio;
        }
        if item.parent_thumb_item_id.is_some() || item.series_thumb_image_tag.is_some() {
            return ASPECT_RATIO_THUMB;
        }
    }

    if matches!(item.kind, ItemKind::UserView | ItemKind::CollectionFolder) && item.has_primary_image
    {
        return ASPECT_RATIO_THUMB;
    }

    item.primary_image_aspect_ratio
        .unwrap_or(ASPECT_RATIO_POSTER_WIDE)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
