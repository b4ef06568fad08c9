#![forbid(unsafe_code)]

//! Lazily loaded review videos.
//!
//! Each embed shows a static poster until it comes within the root margin of
//! the viewport, then asks the host to swap in the player exactly once. A
//! player that fails to load falls back to a placeholder and stays there.

use pinstrip_core::{DocRect, Viewport};
use pinstrip_layout::LazyTrigger;

use crate::command::HostCommand;

/// Review videos on the product page: `(video id, title)`.
pub const REVIEW_VIDEOS: [(&str, &str); 3] = [
    ("WDjE6nPLOUo", "Official Apple Video"),
    ("UdfSrJvqY_E", "MKBHD Review"),
    ("q_zWsElrZNc", "Yahia Radwan Review"),
];

/// Player URL for a video id.
#[must_use]
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?rel=0")
}

/// Poster image URL for a video id.
#[must_use]
pub fn poster_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")
}

/// A video to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEmbed {
    /// Provider video id.
    pub video_id: String,
    /// Accessible title.
    pub title: String,
}

impl VideoEmbed {
    /// Video with the given id and title.
    #[must_use]
    pub fn new(video_id: &str, title: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: title.to_string(),
        }
    }

    /// The page's review videos.
    #[must_use]
    pub fn reviews() -> Vec<Self> {
        REVIEW_VIDEOS
            .iter()
            .map(|(id, title)| Self::new(id, title))
            .collect()
    }

    /// Element id the page uses for this embed.
    #[must_use]
    pub fn element_id(&self) -> String {
        format!("embed-{}", self.video_id)
    }
}

/// What an embed currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    /// Static poster image.
    Poster,
    /// Live player requested.
    Loading,
    /// Player failed; placeholder shown.
    Failed,
}

/// One poster-then-player embed.
#[derive(Debug, Clone)]
pub struct LazyEmbed {
    video: VideoEmbed,
    element_id: String,
    trigger: LazyTrigger,
    state: EmbedState,
}

impl LazyEmbed {
    /// Unmeasured embed with the default 200px margin.
    #[must_use]
    pub fn new(video: VideoEmbed) -> Self {
        Self {
            element_id: video.element_id(),
            video,
            trigger: LazyTrigger::new(),
            state: EmbedState::Poster,
        }
    }

    /// Set the proximity margin (builder pattern).
    #[must_use]
    pub fn with_root_margin(mut self, margin: f64) -> Self {
        self.trigger = self.trigger.with_root_margin(margin);
        self
    }

    /// The video.
    #[must_use]
    pub fn video(&self) -> &VideoEmbed {
        &self.video
    }

    /// Page element id.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> EmbedState {
        self.state
    }

    /// Image or player URL for the current state. `None` once failed.
    #[must_use]
    pub fn src(&self) -> Option<String> {
        match self.state {
            EmbedState::Poster => Some(poster_url(&self.video.video_id)),
            EmbedState::Loading => Some(embed_url(&self.video.video_id)),
            EmbedState::Failed => None,
        }
    }

    /// Record the element's measured rect.
    pub fn measure(&mut self, rect: DocRect) {
        self.trigger.set_target(rect);
    }

    /// Check proximity. Returns the load command the first time the embed
    /// comes near.
    pub fn check(&mut self, scroll_y: f64, viewport: Viewport) -> Option<HostCommand> {
        if self.state != EmbedState::Poster || !self.trigger.check(scroll_y, viewport) {
            return None;
        }
        self.state = EmbedState::Loading;
        Some(HostCommand::BeginLoad {
            embed_id: self.element_id.clone(),
            src: embed_url(&self.video.video_id),
        })
    }

    /// Mark the player as failed.
    pub fn fail(&mut self) {
        self.state = EmbedState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    fn embed() -> LazyEmbed {
        let mut e = LazyEmbed::new(VideoEmbed::new("UdfSrJvqY_E", "MKBHD Review"));
        e.measure(DocRect::new(0.0, 3000.0, 1000.0, 450.0));
        e
    }

    #[test]
    fn urls() {
        assert_eq!(
            embed_url("WDjE6nPLOUo"),
            "https://www.youtube.com/embed/WDjE6nPLOUo?rel=0"
        );
        assert_eq!(
            poster_url("WDjE6nPLOUo"),
            "https://i.ytimg.com/vi/WDjE6nPLOUo/hqdefault.jpg"
        );
    }

    #[test]
    fn loads_within_margin_once() {
        let mut e = embed();
        // Viewport bottom at 1900, margin reaches 2100: still far.
        assert_eq!(e.check(1100.0, VP), None);
        assert_eq!(e.src(), Some(poster_url("UdfSrJvqY_E")));
        // Bottom 2000, margin reaches 2200.
        assert_eq!(e.check(1200.0, VP), None);
        // Bottom 2800 + 200 margin touches the top edge.
        assert_eq!(
            e.check(2000.0, VP),
            Some(HostCommand::BeginLoad {
                embed_id: "embed-UdfSrJvqY_E".into(),
                src: embed_url("UdfSrJvqY_E"),
            })
        );
        assert_eq!(e.check(3000.0, VP), None);
        assert_eq!(e.state(), EmbedState::Loading);
    }

    #[test]
    fn failed_embed_never_loads() {
        let mut e = embed();
        e.fail();
        assert_eq!(e.check(3000.0, VP), None);
        assert_eq!(e.src(), None);
    }

    #[test]
    fn reviews_have_element_ids() {
        let ids: Vec<_> = VideoEmbed::reviews().iter().map(VideoEmbed::element_id).collect();
        assert_eq!(ids, ["embed-WDjE6nPLOUo", "embed-UdfSrJvqY_E", "embed-q_zWsElrZNc"]);
    }
}
