//! Image fallback cascades.
//!
//! Each cascade is an ordered table of rules. A rule may move the request to
//! another identity (series, parent, album artist) with or without a tag;
//! the walk stops at the first rule that yields a tag. Identity moves stick
//! even when no tag turns up, because the server still renders a default
//! image for the new identity.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::image::{
    ImageFormat, ImageRole, ImageUrlBuilder, ItemKind, LibraryItem, MAX_PRIMARY_IMAGE_HEIGHT,
    non_empty,
};

pub const BACKGROUND_BLUR_RADIUS: u32 = 24;

/// Size, encoding and fallback switches for one image request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageQuery {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub format: Option<ImageFormat>,
    pub blur: Option<u32>,
    pub require_tag: bool,
    pub allow_parent_fallback: bool,
    pub prefer_series_fallback: bool,
    pub prefer_season_fallback: bool,
}

impl ImageQuery {
    pub fn tagged() -> Self {
        Self {
            require_tag: true,
            ..Self::default()
        }
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    item_id: &'a str,
    tag: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    fn new(item_id: &'a str, tag: Option<&'a str>) -> Self {
        Self {
            item_id,
            tag: non_empty(tag),
        }
    }
}

struct Lookup<'a> {
    item: &'a LibraryItem,
    role: ImageRole,
    query: &'a ImageQuery,
}

impl Lookup<'_> {
    fn prefers_season(&self) -> bool {
        self.query.prefer_season_fallback && self.item.episode_season_id().is_some()
    }

    fn prefers_series(&self) -> bool {
        !self.prefers_season()
            && self.query.prefer_series_fallback
            && self.item.episode_series_id().is_some()
    }

    fn tries_parent(&self) -> bool {
        self.query.allow_parent_fallback || self.prefers_season() || self.prefers_series()
    }
}

type Rule = for<'a> fn(&Lookup<'a>) -> Option<Candidate<'a>>;

const ITEM_RULES: &[Rule] = &[
    own_tag,
    preferred_series,
    album_or_channel,
    parent_pointer,
    series_retry,
    first_album_artist,
];

fn own_tag<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    // Season preference discards the item's own art; series preference replaces it.
    if lookup.prefers_season() || lookup.prefers_series() {
        return None;
    }
    let item = lookup.item;
    let tag = item.image_tag(lookup.role).or_else(|| match lookup.role {
        ImageRole::Backdrop => item.first_backdrop_tag(),
        _ => None,
    });
    Some(Candidate::new(&item.id, tag))
}

fn preferred_series<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    if !lookup.prefers_series() {
        return None;
    }
    series_candidate(lookup)
}

fn series_candidate<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    let series_id = lookup.item.episode_series_id()?;
    Some(Candidate::new(
        series_id,
        lookup.item.series_image_tag(lookup.role),
    ))
}

fn album_or_channel<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    if lookup.role != ImageRole::Primary {
        return None;
    }
    let item = lookup.item;
    let (id, tag) = match item.kind {
        ItemKind::Audio => (&item.album_id, &item.album_primary_image_tag),
        kind if kind.is_channel() => (&item.channel_id, &item.channel_primary_image_tag),
        _ => return None,
    };
    let id = non_empty(id.as_deref())?;
    let tag = non_empty(tag.as_deref())?;
    Some(Candidate::new(id, Some(tag)))
}

type ParentAccessor = for<'a> fn(&'a LibraryItem) -> (Option<&'a str>, Option<&'a str>);

/// Which parent pointer backs each role. Roles absent here have no parent art.
const PARENT_POINTERS: &[(ImageRole, ParentAccessor)] = &[
    (ImageRole::Primary, parent_primary),
    (ImageRole::Art, parent_art),
    (ImageRole::Backdrop, parent_backdrop),
    (ImageRole::Logo, parent_logo),
    (ImageRole::Thumb, parent_thumb),
];

fn parent_primary(item: &LibraryItem) -> (Option<&str>, Option<&str>) {
    (
        item.parent_primary_image_item_id.as_deref(),
        item.parent_primary_image_tag.as_deref(),
    )
}

fn parent_art(item: &LibraryItem) -> (Option<&str>, Option<&str>) {
    (
        item.parent_art_item_id.as_deref(),
        item.parent_art_image_tag.as_deref(),
    )
}

fn parent_backdrop(item: &LibraryItem) -> (Option<&str>, Option<&str>) {
    (
        item.parent_backdrop_item_id.as_deref(),
        item.parent_backdrop_image_tags.first().map(String::as_str),
    )
}

fn parent_logo(item: &LibraryItem) -> (Option<&str>, Option<&str>) {
    (
        item.parent_logo_item_id.as_deref(),
        item.parent_logo_image_tag.as_deref(),
    )
}

fn parent_thumb(item: &LibraryItem) -> (Option<&str>, Option<&str>) {
    (
        item.parent_thumb_item_id.as_deref(),
        item.parent_thumb_image_tag.as_deref(),
    )
}

fn parent_pointer_for(item: &LibraryItem, role: ImageRole) -> Option<Candidate<'_>> {
    let (_, accessor) = PARENT_POINTERS.iter().find(|(r, _)| *r == role)?;
    let (id, tag) = accessor(item);
    Some(Candidate::new(non_empty(id)?, tag))
}

fn parent_pointer<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    if !lookup.tries_parent() {
        return None;
    }
    parent_pointer_for(lookup.item, lookup.role)
}

fn series_retry<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    series_candidate(lookup)
}

fn first_album_artist<'a>(lookup: &Lookup<'a>) -> Option<Candidate<'a>> {
    if lookup.item.kind != ItemKind::Audio {
        return None;
    }
    let artist = lookup.item.album_artists.first()?;
    Some(Candidate::new(non_empty(Some(artist.id.as_str()))?, None))
}

fn walk<'a>(lookup: &Lookup<'a>) -> Candidate<'a> {
    let mut current = Candidate::new(&lookup.item.id, None);
    for rule in ITEM_RULES {
        if let Some(candidate) = rule(lookup) {
            current = candidate;
            if current.tag.is_some() {
                break;
            }
        }
    }
    current
}

type CardRule = for<'a> fn(&'a LibraryItem) -> Option<(Candidate<'a>, ImageRole)>;

const PARENT_THUMB_RULES: &[CardRule] = &[
    card_parent_thumb,
    card_series_thumb,
    card_parent_backdrop,
];

const OWN_CARD_RULES: &[CardRule] = &[card_own_thumb, card_own_backdrop, card_own_primary];

fn card_parent_thumb(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    tagged(parent_pointer_for(item, ImageRole::Thumb)?, ImageRole::Thumb)
}

fn card_series_thumb(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    let id = non_empty(item.series_id.as_deref())?;
    tagged(
        Candidate::new(id, item.series_thumb_image_tag.as_deref()),
        ImageRole::Thumb,
    )
}

fn card_parent_backdrop(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    tagged(
        parent_pointer_for(item, ImageRole::Backdrop)?,
        ImageRole::Backdrop,
    )
}

fn card_own_thumb(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    tagged(
        Candidate::new(&item.id, item.image_tag(ImageRole::Thumb)),
        ImageRole::Thumb,
    )
}

fn card_own_backdrop(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    let tag = item
        .image_tag(ImageRole::Backdrop)
        .or_else(|| item.first_backdrop_tag());
    tagged(Candidate::new(&item.id, tag), ImageRole::Backdrop)
}

fn card_own_primary(item: &LibraryItem) -> Option<(Candidate<'_>, ImageRole)> {
    tagged(
        Candidate::new(&item.id, item.image_tag(ImageRole::Primary)),
        ImageRole::Primary,
    )
}

fn tagged(candidate: Candidate<'_>, role: ImageRole) -> Option<(Candidate<'_>, ImageRole)> {
    candidate.tag.map(|_| (candidate, role))
}

/// Turns library items into image request URLs for one server.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    urls: ImageUrlBuilder,
}

impl ImageResolver {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self::with_builder(ImageUrlBuilder::new(server_url)?))
    }

    pub fn with_builder(urls: ImageUrlBuilder) -> Self {
        Self { urls }
    }

    /// Runs the full cascade. `None` means "render no image", never an error.
    pub fn resolve(
        &self,
        item: &LibraryItem,
        role: ImageRole,
        query: &ImageQuery,
    ) -> Option<String> {
        let lookup = Lookup { item, role, query };
        let found = walk(&lookup);
        trace!(
            item = %item.id,
            role = %role,
            resolved = found.item_id,
            tag = found.tag.unwrap_or_default(),
            "Resolved image identity"
        );
        if query.require_tag && found.tag.is_none() {
            return None;
        }
        Some(self.urls.item_image(found.item_id, role, found.tag, query))
    }

    /// Own logo, then the parent's logo, then (optionally) the series
    /// identity without a tag.
    pub fn resolve_logo(
        &self,
        item: &LibraryItem,
        max_width: Option<u32>,
        series_fallback: bool,
    ) -> Option<String> {
        let query = ImageQuery {
            max_width,
            ..ImageQuery::default()
        };
        let found = item
            .image_tag(ImageRole::Logo)
            .map(|tag| Candidate::new(&item.id, Some(tag)))
            .or_else(|| {
                parent_pointer_for(item, ImageRole::Logo).filter(|parent| parent.tag.is_some())
            })
            .or_else(|| {
                series_fallback
                    .then(|| non_empty(item.series_id.as_deref()))
                    .flatten()
                    .map(|series| Candidate::new(series, None))
            })?;
        Some(
            self.urls
                .item_image(found.item_id, ImageRole::Logo, found.tag, &query),
        )
    }

    /// Artwork for wide cards. Returns the URL with the role it ended up
    /// using so callers can size the card.
    pub fn resolve_card_thumb(
        &self,
        item: &LibraryItem,
        max_height: Option<u32>,
        prefer_parent_thumb: bool,
    ) -> Option<(String, ImageRole)> {
        let parent_rules: &[CardRule] = if prefer_parent_thumb {
            PARENT_THUMB_RULES
        } else {
            &[]
        };
        let (found, role) = parent_rules
            .iter()
            .chain(OWN_CARD_RULES)
            .find_map(|rule| rule(item))?;
        let query = ImageQuery {
            max_height,
            ..ImageQuery::default()
        };
        Some((
            self.urls.item_image(found.item_id, role, found.tag, &query),
            role,
        ))
    }

    /// Blurred full-screen background. Episodes and seasons use their
    /// series so the background stays put while browsing.
    pub fn background_url(&self, item: &LibraryItem, max_height: Option<u32>) -> String {
        let item_id = match item.kind {
            ItemKind::Episode | ItemKind::Season => {
                non_empty(item.series_id.as_deref()).unwrap_or(&item.id)
            }
            _ => &item.id,
        };
        let query = ImageQuery {
            max_height,
            format: Some(ImageFormat::Webp),
            blur: Some(BACKGROUND_BLUR_RADIUS),
            ..ImageQuery::default()
        };
        self.urls
            .item_image(item_id, ImageRole::Backdrop, None, &query)
    }

    pub fn primary(&self, item: &LibraryItem) -> Option<String> {
        self.primary_with_height(item, MAX_PRIMARY_IMAGE_HEIGHT)
    }

    pub fn primary_with_height(&self, item: &LibraryItem, max_height: u32) -> Option<String> {
        self.resolve(
            item,
            ImageRole::Primary,
            &ImageQuery::tagged().with_max_height(max_height),
        )
    }

    pub fn thumb(&self, item: &LibraryItem, max_height: u32) -> Option<String> {
        self.resolve(
            item,
            ImageRole::Thumb,
            &ImageQuery::tagged().with_max_height(max_height),
        )
    }

    pub fn banner(&self, item: &LibraryItem, max_height: u32) -> Option<String> {
        self.resolve(
            item,
            ImageRole::Banner,
            &ImageQuery::tagged().with_max_height(max_height),
        )
    }

    pub fn backdrop(&self, item: &LibraryItem, max_height: u32) -> Option<String> {
        self.resolve(
            item,
            ImageRole::Backdrop,
            &ImageQuery::tagged().with_max_height(max_height),
        )
    }

    pub fn logo(&self, item: &LibraryItem, max_width: Option<u32>) -> Option<String> {
        let mut query = ImageQuery::tagged();
        query.max_width = max_width;
        self.resolve(item, ImageRole::Logo, &query)
    }
}
