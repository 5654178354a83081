//! Declarative description of what the screen should show.
//!
//! Built from state alone, so everything the user sees can be checked
//! without a terminal. `ui` is the only consumer.

use crate::gallery::{LoadStatus, Overlay, PageState};
use crate::models::{CastMember, Movie};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_CAST: &str = "Unknown";
pub const NO_CAST: &str = "No cast information.";
pub const NO_RESULTS: &str = "No movies found.";
pub const LOAD_FAILED: &str = "Could not load movies. Please try again later.";
pub const MAX_CAST: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub body: Body,
    pub pagination: PaginationView,
    pub busy: bool,
    pub overlay: Option<DetailView>,
}

/// Contents of the display area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Nothing settled yet.
    Pending,
    Cards(Vec<CardView>),
    Message(String),
    Error { headline: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub poster: String,
    pub title: String,
    pub description: String,
    pub cast: CastView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastView {
    Members(Vec<CastMemberView>),
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMemberView {
    pub name: String,
    pub image: String,
}

impl GalleryView {
    pub fn build(state: &PageState, overlay: &Overlay, busy: bool) -> Self {
        let body = match &state.status {
            LoadStatus::Idle => Body::Pending,
            LoadStatus::Failed(reason) => Body::Error {
                headline: LOAD_FAILED.to_string(),
                reason: reason.clone(),
            },
            LoadStatus::Loaded if state.visible_movies.is_empty() => {
                Body::Message(NO_RESULTS.to_string())
            }
            LoadStatus::Loaded => Body::Cards(state.visible_movies.iter().map(CardView::from).collect()),
        };

        Self {
            body,
            pagination: PaginationView {
                label: state.page_label(),
                prev_enabled: state.can_go_prev(),
                next_enabled: state.can_go_next(),
            },
            busy,
            overlay: overlay.movie().map(DetailView::from),
        }
    }
}

impl From<&Movie> for CardView {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title().unwrap_or(UNTITLED).to_string(),
            poster: movie.poster().map(str::to_string),
        }
    }
}

impl From<&Movie> for DetailView {
    fn from(movie: &Movie) -> Self {
        let cast = match movie.casts.as_deref() {
            Some(members) if !members.is_empty() => CastView::Members(
                members
                    .iter()
                    .take(MAX_CAST)
                    .map(CastMemberView::from)
                    .collect(),
            ),
            _ => CastView::Missing(NO_CAST.to_string()),
        };

        Self {
            poster: movie.poster().unwrap_or_default().to_string(),
            title: movie.title().unwrap_or(UNTITLED).to_string(),
            description: movie.description().unwrap_or(NO_DESCRIPTION).to_string(),
            cast,
        }
    }
}

impl From<&CastMember> for CastMemberView {
    fn from(member: &CastMember) -> Self {
        Self {
            name: member.display_name().unwrap_or(UNKNOWN_CAST).to_string(),
            image: member.profile().unwrap_or_default().to_string(),
        }
    }
}
