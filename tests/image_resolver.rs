use leanback_profiles::image::{
    ASPECT_RATIO_POSTER_WIDE, ASPECT_RATIO_THUMB, AlbumArtist, ImageQuery, ImageResolver,
    ImageRole, ItemKind, LibraryItem, image_aspect_ratio,
};

const SERVER: &str = "https://media.example:8920";

fn resolver() -> ImageResolver {
    ImageResolver::new(SERVER).unwrap()
}

fn url(path: &str) -> String {
    format!("{SERVER}{path}")
}

fn episode() -> LibraryItem {
    LibraryItem {
        series_id: Some("S".into()),
        series_primary_image_tag: Some("abc".into()),
        season_id: Some("SEASON".into()),
        ..LibraryItem::new("E1", ItemKind::Episode)
    }
}

#[test]
fn episode_prefers_series_primary() {
    let query = ImageQuery {
        prefer_series_fallback: true,
        ..ImageQuery::default()
    };
    let resolved = resolver().resolve(&episode(), ImageRole::Primary, &query);
    assert_eq!(resolved, Some(url("/Items/S/Images/Primary?tag=abc")));
}

#[test]
fn series_preference_replaces_own_tag() {
    let mut item = episode();
    item.image_tags.insert(ImageRole::Primary, "own".into());
    let query = ImageQuery {
        prefer_series_fallback: true,
        ..ImageQuery::default()
    };
    let resolved = resolver().resolve(&item, ImageRole::Primary, &query);
    assert_eq!(resolved, Some(url("/Items/S/Images/Primary?tag=abc")));

    let own = resolver().resolve(&item, ImageRole::Primary, &ImageQuery::default());
    assert_eq!(own, Some(url("/Items/E1/Images/Primary?tag=own")));
}

#[test]
fn season_preference_uses_parent_pointer() {
    let mut item = episode();
    item.image_tags.insert(ImageRole::Primary, "own".into());
    item.parent_primary_image_item_id = Some("SEASON".into());
    item.parent_primary_image_tag = Some("season-tag".into());
    let query = ImageQuery {
        prefer_season_fallback: true,
        prefer_series_fallback: true,
        require_tag: true,
        ..ImageQuery::default()
    };
    let resolved = resolver().resolve(&item, ImageRole::Primary, &query);
    assert_eq!(
        resolved,
        Some(url("/Items/SEASON/Images/Primary?tag=season-tag"))
    );
}

#[test]
fn episode_without_art_retries_series() {
    let query = ImageQuery::tagged().with_max_height(200);
    let resolved = resolver().resolve(&episode(), ImageRole::Primary, &query);
    assert_eq!(
        resolved,
        Some(url("/Items/S/Images/Primary?tag=abc&maxHeight=200"))
    );
}

#[test]
fn audio_without_album_redirects_to_first_artist() {
    let item = LibraryItem {
        album_artists: vec![
            AlbumArtist {
                id: "A".into(),
                name: Some("First".into()),
            },
            AlbumArtist {
                id: "B".into(),
                name: None,
            },
        ],
        ..LibraryItem::new("T1", ItemKind::Audio)
    };
    let resolved = resolver().resolve(&item, ImageRole::Primary, &ImageQuery::default());
    assert_eq!(resolved, Some(url("/Items/A/Images/Primary")));

    let required = resolver().resolve(&item, ImageRole::Primary, &ImageQuery::tagged());
    assert_eq!(required, None);
}

#[test]
fn audio_uses_album_primary_before_artist() {
    let item = LibraryItem {
        album_id: Some("AL".into()),
        album_primary_image_tag: Some("cover".into()),
        album_artists: vec![AlbumArtist {
            id: "A".into(),
            name: None,
        }],
        ..LibraryItem::new("T1", ItemKind::Audio)
    };
    let resolved = resolver().resolve(&item, ImageRole::Primary, &ImageQuery::tagged());
    assert_eq!(resolved, Some(url("/Items/AL/Images/Primary?tag=cover")));
}

#[test]
fn channel_items_use_channel_primary() {
    let item = LibraryItem {
        channel_id: Some("CH".into()),
        channel_primary_image_tag: Some("logo".into()),
        ..LibraryItem::new("P1", ItemKind::Channel)
    };
    let resolved = resolver().resolve(&item, ImageRole::Primary, &ImageQuery::tagged());
    assert_eq!(resolved, Some(url("/Items/CH/Images/Primary?tag=logo")));
}

#[test]
fn nothing_resolvable_with_required_tag_is_absent() {
    let item = LibraryItem::new("M1", ItemKind::Movie);
    for role in ImageRole::ALL {
        let query = ImageQuery {
            require_tag: true,
            allow_parent_fallback: true,
            prefer_series_fallback: true,
            prefer_season_fallback: true,
            ..ImageQuery::default()
        };
        assert_eq!(resolver().resolve(&item, role, &query), None, "{role}");
    }
}

#[test]
fn untagged_resolution_still_renders_default_image() {
    let item = LibraryItem::new("M1", ItemKind::Movie);
    let resolved = resolver().resolve(&item, ImageRole::Banner, &ImageQuery::default());
    assert_eq!(resolved, Some(url("/Items/M1/Images/Banner")));
}

#[test]
fn season_preference_discards_own_backdrop_list() {
    let mut item = episode();
    item.backdrop_image_tags = vec!["own-b".into()];
    item.parent_backdrop_item_id = Some("SEASON".into());
    item.parent_backdrop_image_tags = vec!["season-b".into()];
    let query = ImageQuery {
        prefer_season_fallback: true,
        require_tag: true,
        ..ImageQuery::default()
    };
    let resolved = resolver().resolve(&item, ImageRole::Backdrop, &query);
    assert_eq!(resolved, Some(url("/Items/SEASON/Images/Backdrop?tag=season-b")));

    item.parent_backdrop_item_id = None;
    item.parent_backdrop_image_tags.clear();
    assert_eq!(resolver().resolve(&item, ImageRole::Backdrop, &query), None);

    let own = resolver().resolve(&item, ImageRole::Backdrop, &ImageQuery::tagged());
    assert_eq!(own, Some(url("/Items/E1/Images/Backdrop?tag=own-b")));
}

#[test]
fn backdrop_falls_back_to_backdrop_list() {
    let item = LibraryItem {
        backdrop_image_tags: vec!["b0".into(), "b1".into()],
        ..LibraryItem::new("M1", ItemKind::Movie)
    };
    let resolved = resolver().backdrop(&item, 720);
    assert_eq!(
        resolved,
        Some(url("/Items/M1/Images/Backdrop?tag=b0&maxHeight=720"))
    );
}

#[test]
fn parent_fallback_follows_role_table() {
    let item = LibraryItem {
        parent_art_item_id: Some("PA".into()),
        parent_art_image_tag: Some("art".into()),
        parent_backdrop_item_id: Some("PB".into()),
        parent_backdrop_image_tags: vec!["bd".into()],
        parent_logo_item_id: Some("PL".into()),
        parent_logo_image_tag: Some("lg".into()),
        parent_thumb_item_id: Some("PT".into()),
        parent_thumb_image_tag: Some("th".into()),
        ..LibraryItem::new("X", ItemKind::Folder)
    };
    let query = ImageQuery {
        allow_parent_fallback: true,
        require_tag: true,
        ..ImageQuery::default()
    };
    let cases = [
        (ImageRole::Art, "/Items/PA/Images/Art?tag=art"),
        (ImageRole::Backdrop, "/Items/PB/Images/Backdrop?tag=bd"),
        (ImageRole::Logo, "/Items/PL/Images/Logo?tag=lg"),
        (ImageRole::Thumb, "/Items/PT/Images/Thumb?tag=th"),
    ];
    for (role, expected) in cases {
        assert_eq!(
            resolver().resolve(&item, role, &query),
            Some(url(expected)),
            "{role}"
        );
    }
    assert_eq!(resolver().resolve(&item, ImageRole::Banner, &query), None);
}

#[test]
fn parent_identity_sticks_without_tag() {
    let item = LibraryItem {
        parent_thumb_item_id: Some("PT".into()),
        ..LibraryItem::new("X", ItemKind::Folder)
    };
    let query = ImageQuery {
        allow_parent_fallback: true,
        ..ImageQuery::default()
    };
    let resolved = resolver().resolve(&item, ImageRole::Thumb, &query);
    assert_eq!(resolved, Some(url("/Items/PT/Images/Thumb")));
}

#[test]
fn resolution_is_idempotent() {
    let item = episode();
    let query = ImageQuery {
        prefer_series_fallback: true,
        max_width: Some(400),
        ..ImageQuery::default()
    };
    let resolver = resolver();
    let first = resolver.resolve(&item, ImageRole::Primary, &query);
    let second = resolver.resolve(&item, ImageRole::Primary, &query);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn logo_cascade_prefers_own_then_parent_then_series() {
    let mut item = episode();
    assert_eq!(
        resolver().resolve_logo(&item, Some(300), true),
        Some(url("/Items/S/Images/Logo?maxWidth=300"))
    );
    assert_eq!(resolver().resolve_logo(&item, None, false), None);

    item.parent_logo_item_id = Some("S".into());
    item.parent_logo_image_tag = Some("series-logo".into());
    assert_eq!(
        resolver().resolve_logo(&item, None, false),
        Some(url("/Items/S/Images/Logo?tag=series-logo"))
    );

    item.image_tags.insert(ImageRole::Logo, "own-logo".into());
    assert_eq!(
        resolver().resolve_logo(&item, None, true),
        Some(url("/Items/E1/Images/Logo?tag=own-logo"))
    );
}

#[test]
fn card_thumb_prefers_parent_art_when_asked() {
    let mut item = episode();
    item.series_thumb_image_tag = Some("st".into());
    item.image_tags.insert(ImageRole::Primary, "p".into());

    let (url_parent, role) = resolver()
        .resolve_card_thumb(&item, Some(300), true)
        .unwrap();
    assert_eq!(role, ImageRole::Thumb);
    assert_eq!(url_parent, url("/Items/S/Images/Thumb?tag=st&maxHeight=300"));

    let (url_own, role) = resolver()
        .resolve_card_thumb(&item, Some(300), false)
        .unwrap();
    assert_eq!(role, ImageRole::Primary);
    assert_eq!(url_own, url("/Items/E1/Images/Primary?tag=p&maxHeight=300"));

    item.parent_thumb_item_id = Some("SEASON".into());
    item.parent_thumb_image_tag = Some("pt".into());
    let (_, role) = resolver().resolve_card_thumb(&item, None, true).unwrap();
    assert_eq!(role, ImageRole::Thumb);
}

#[test]
fn card_thumb_falls_through_to_own_backdrop() {
    let item = LibraryItem {
        backdrop_image_tags: vec!["bd".into()],
        ..LibraryItem::new("M1", ItemKind::Movie)
    };
    let (url_bd, role) = resolver().resolve_card_thumb(&item, None, true).unwrap();
    assert_eq!(role, ImageRole::Backdrop);
    assert_eq!(url_bd, url("/Items/M1/Images/Backdrop?tag=bd"));

    let bare = LibraryItem::new("M2", ItemKind::Movie);
    assert!(resolver().resolve_card_thumb(&bare, None, true).is_none());
}

#[test]
fn background_uses_series_and_blur() {
    let resolved = resolver().background_url(&episode(), Some(1080));
    assert_eq!(
        resolved,
        url("/Items/S/Images/Backdrop?maxHeight=1080&format=Webp&blur=24")
    );
    let movie = LibraryItem::new("M1", ItemKind::Movie);
    assert_eq!(
        resolver().background_url(&movie, None),
        url("/Items/M1/Images/Backdrop?format=Webp&blur=24")
    );
}

#[test]
fn primary_helper_requires_tag_and_caps_height() {
    let mut item = LibraryItem::new("M1", ItemKind::Movie);
    assert_eq!(resolver().primary(&item), None);
    item.image_tags.insert(ImageRole::Primary, "p".into());
    assert_eq!(
        resolver().primary(&item),
        Some(url("/Items/M1/Images/Primary?tag=p&maxHeight=370"))
    );
}

#[test]
fn items_parse_from_server_json() {
    let json = r#"{
        "Id": "E1",
        "Type": "Episode",
        "ImageTags": {"Primary": "p1", "Thumb": "t1"},
        "BackdropImageTags": [],
        "SeriesId": "S",
        "SeriesPrimaryImageTag": "abc",
        "ParentBackdropItemId": "S",
        "ParentBackdropImageTags": ["b0"],
        "PrimaryImageAspectRatio": 1.7777,
        "SomethingElse": true
    }"#;
    let item: LibraryItem = serde_json::from_str(json).unwrap();
    assert_eq!(item.kind, ItemKind::Episode);
    assert_eq!(item.image_tag(ImageRole::Thumb), Some("t1"));
    assert_eq!(item.parent_backdrop_image_tags, vec!["b0"]);

    let odd: LibraryItem = serde_json::from_str(r#"{"Id": "Z", "Type": "Playlist"}"#).unwrap();
    assert_eq!(odd.kind, ItemKind::Unknown);
}

#[test]
fn aspect_ratio_prefers_thumb_for_episodes() {
    let mut item = LibraryItem::new("E1", ItemKind::Episode);
    assert_eq!(image_aspect_ratio(&item), ASPECT_RATIO_POSTER_WIDE);
    item.series_thumb_image_tag = Some("t".into());
    assert_eq!(image_aspect_ratio(&item), ASPECT_RATIO_THUMB);
    item.primary_image_aspect_ratio = Some(1.5);
    assert_eq!(image_aspect_ratio(&item), 1.5);

    let view = LibraryItem {
        has_primary_image: true,
        ..LibraryItem::new("V", ItemKind::UserView)
    };
    assert_eq!(image_aspect_ratio(&view), ASPECT_RATIO_THUMB);
}

#[test]
fn image_roles_parse_case_insensitively() {
    assert_eq!("backdrop".parse::<ImageRole>().unwrap(), ImageRole::Backdrop);
    assert_eq!("Thumb".parse::<ImageRole>().unwrap(), ImageRole::Thumb);
    assert!("poster".parse::<ImageRole>().is_err());
}
