use anyhow::{Context, Result, bail};
use url::Url;

use crate::image::ImageRole;
use crate::image::resolver::ImageQuery;

/// Renders item image requests against one server base URL:
/// `{base}/Items/{id}/Images/{Role}?tag=..&maxWidth=..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base: Url,
}

impl ImageUrlBuilder {
    pub fn new(base: &str) -> Result<Self> {
        let base =
            Url::parse(base.trim()).with_context(|| format!("Invalid server URL: {base}"))?;
        if base.cannot_be_a_base() {
            bail!("Server URL cannot carry a path: {base}");
        }
        Ok(Self { base })
    }

    /// An empty or missing tag is left out; the server then serves the
    /// identity's default image.
    pub fn item_image(
        &self,
        item_id: &str,
        role: ImageRole,
        tag: Option<&str>,
        query: &ImageQuery,
    ) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["Items", item_id, "Images", role.as_str()]);
        }

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            params.push(("tag", tag.to_string()));
        }
        if let Some(width) = query.max_width {
            params.push(("maxWidth", width.to_string()));
        }
        if let Some(height) = query.max_height {
            params.push(("maxHeight", height.to_string()));
        }
        if let Some(format) = query.format {
            params.push(("format", format.as_str().to_string()));
        }
        if let Some(blur) = query.blur {
            params.push(("blur", blur.to_string()));
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        url.into()
    }
}
