#![forbid(unsafe_code)]

//! Page measurement seam.
//!
//! The session reads geometry through [`Measure`] and never holds element
//! handles. Browser hosts implement it over the DOM; tests use [`MockDom`].
//!
//! All rects are in document coordinates (scroll already added), matching
//! what the layout crate consumes.

use std::collections::HashMap;

use pinstrip_core::{DocRect, Viewport};

/// Read-only view of the page geometry.
pub trait Measure {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current document `scrollY`.
    fn scroll_y(&self) -> f64;

    /// Full document height.
    fn document_height(&self) -> f64;

    /// Document rect of the element with `id`, or `None` if it is absent.
    fn rect(&self, id: &str) -> Option<DocRect>;

    /// Panel ids inside `container`, in strip order. Empty if the container
    /// is absent or has no panels.
    fn children(&self, container: &str) -> Vec<String>;
}

/// In-memory page for tests and native hosts.
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    viewport: Viewport,
    scroll_y: f64,
    document_height: f64,
    rects: HashMap<String, DocRect>,
    children: HashMap<String, Vec<String>>,
}

impl MockDom {
    /// Empty page with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// The product page at `viewport`: hero, features, the pinned color
    /// strip with one spacer viewport per variant, three review embeds, and
    /// pricing. Section heights are one viewport each.
    #[must_use]
    pub fn product_page(viewport: Viewport, variant_ids: &[&str]) -> Self {
        let vh = viewport.height;
        let vw = viewport.width;
        let colors_top = 2.0 * vh;
        let colors_height = vh * (1.0 + variant_ids.len() as f64);
        let videos_top = colors_top + colors_height;
        let pricing_top = videos_top + vh;
        let embed_height = vh / 3.0;

        let mut dom = Self::new(viewport)
            .with_rect("home", DocRect::new(0.0, 0.0, vw, vh))
            .with_rect("features", DocRect::new(0.0, vh, vw, vh))
            .with_rect("colors", DocRect::new(0.0, colors_top, vw, colors_height))
            .with_rect("videos", DocRect::new(0.0, videos_top, vw, vh))
            .with_rect("pricing", DocRect::new(0.0, pricing_top, vw, vh))
            .with_rect("nav-item", DocRect::new(0.0, 0.0, 96.0, 40.0))
            .with_children("colors-strip", variant_ids.iter().copied())
            .with_document_height(pricing_top + vh);
        for (i, (video_id, _)) in crate::lazy_embed::REVIEW_VIDEOS.iter().enumerate() {
            dom = dom.with_rect(
                &format!("embed-{video_id}"),
                DocRect::new(0.0, videos_top + i as f64 * embed_height, vw, embed_height),
            );
        }
        dom
    }

    /// Add or replace an element rect (builder pattern).
    #[must_use]
    pub fn with_rect(mut self, id: &str, rect: DocRect) -> Self {
        self.rects.insert(id.to_string(), rect);
        self
    }

    /// Set a container's panel ids (builder pattern).
    #[must_use]
    pub fn with_children<'a>(mut self, container: &str, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.children
            .insert(container.to_string(), ids.into_iter().map(String::from).collect());
        self
    }

    /// Set the document height (builder pattern).
    #[must_use]
    pub fn with_document_height(mut self, height: f64) -> Self {
        self.document_height = height;
        self
    }

    /// Move the scroll position.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Resize the viewport. Geometry is not reflowed; replace rects as
    /// needed.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace an element rect.
    pub fn set_rect(&mut self, id: &str, rect: DocRect) {
        self.rects.insert(id.to_string(), rect);
    }

    /// Remove an element and any panels it contained.
    pub fn remove(&mut self, id: &str) {
        self.rects.remove(id);
        self.children.remove(id);
    }
}

impl Measure for MockDom {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn rect(&self, id: &str) -> Option<DocRect> {
        self.rects.get(id).copied()
    }

    fn children(&self, container: &str) -> Vec<String> {
        self.children.get(container).cloned().unwrap_or_default()
    }
}
