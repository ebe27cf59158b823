//! Presentational component types.
//!
//! Stateless view models rendered by the partials in
//! `templates/components/`. None of them carry business logic; pages pick
//! which one to show.

/// Number of skeleton cards shown while a listing loads.
pub const SKELETON_CARDS: usize = 6;

/// Page title and description.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Metadata for a restaurant page, derived from its URL slug.
    #[must_use]
    pub fn for_restaurant_slug(slug: &str) -> Self {
        let name = humanize_slug(slug);
        let description = format!("Order from {name} on DashDrop. Fast delivery to your door.");
        Self::new(name, description)
    }
}

/// Spinner size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SpinnerSize {
    /// Rendered width and height in pixels.
    #[must_use]
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Small => 16,
            Self::Medium => 32,
            Self::Large => 56,
        }
    }
}

/// Loading indicator.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    pub size: SpinnerSize,
    /// Stroke color (any SVG paint value).
    pub color: String,
    pub text: Option<String>,
    /// Cover the whole viewport instead of sitting inline.
    pub full_screen: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self {
            size: SpinnerSize::Medium,
            color: "#f97316".to_string(),
            text: None,
            full_screen: false,
        }
    }
}

impl LoadingIndicator {
    /// Inline spinner with a caption.
    #[must_use]
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Viewport-covering spinner with a caption.
    #[must_use]
    pub fn full_screen(text: impl Into<String>) -> Self {
        Self {
            size: SpinnerSize::Large,
            text: Some(text.into()),
            full_screen: true,
            ..Self::default()
        }
    }

    /// CSS class of the wrapping element.
    #[must_use]
    pub const fn container_class(&self) -> &'static str {
        if self.full_screen {
            "loading loading-fullscreen"
        } else {
            "loading"
        }
    }
}

/// Icon shown by an [`EmptyState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStateIcon {
    Search,
    Store,
}

impl EmptyStateIcon {
    /// Inline SVG markup.
    #[must_use]
    pub const fn svg(self) -> &'static str {
        match self {
            Self::Search => {
                r#"<svg width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round"><circle cx="11" cy="11" r="7"/><path d="m20 20-3.5-3.5"/></svg>"#
            }
            Self::Store => {
                r#"<svg width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linejoin="round"><path d="M3 9l1.5-5h15L21 9"/><path d="M4 9v11h16V9"/><path d="M9 20v-6h6v6"/></svg>"#
            }
        }
    }
}

/// Empty state for listings with zero results.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
    pub icon: EmptyStateIcon,
}

impl EmptyState {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: EmptyStateIcon,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon,
        }
    }
}

/// Turn a URL slug into a display name (`pizza-palace` -> `Pizza Palace`).
#[must_use]
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
