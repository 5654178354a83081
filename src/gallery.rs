use crate::api::LoadError;
use crate::models::{Movie, MoviePage};

/// Outcome of the most recent applied page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing has settled yet.
    Idle,
    Loaded,
    Failed(String),
}

/// Movies and pagination bounds for the page currently on screen.
#[derive(Debug, Clone)]
pub struct PageState {
    pub current_page: u32,
    pub last_page: u32,
    pub raw_movies: Vec<Movie>,
    pub search_term: String,
    pub visible_movies: Vec<Movie>,
    pub status: LoadStatus,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            raw_movies: Vec::new(),
            search_term: String::new(),
            visible_movies: Vec::new(),
            status: LoadStatus::Idle,
        }
    }

    /// Replace the page wholesale with a freshly fetched one.
    pub fn apply_page(&mut self, page: MoviePage) {
        self.raw_movies = page.movies;
        self.current_page = page.current_page;
        self.last_page = page.last_page;
        self.status = LoadStatus::Loaded;
        self.refilter();
    }

    /// Record a failed load. Page numbers are left as they were.
    pub fn apply_failure(&mut self, error: &LoadError) {
        self.status = LoadStatus::Failed(error.user_message());
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    pub fn refilter(&mut self) {
        self.visible_movies = apply_filter(&self.raw_movies, &self.search_term);
    }

    pub fn can_go_prev(&self) -> bool {
        self.status == LoadStatus::Loaded && self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.status == LoadStatus::Loaded && self.current_page < self.last_page
    }

    /// "Page X of Y" once a page is loaded, empty otherwise.
    pub fn page_label(&self) -> String {
        match self.status {
            LoadStatus::Loaded => format!("Page {} of {}", self.current_page, self.last_page),
            _ => String::new(),
        }
    }
}

/// Movies from `raw` whose title contains `term`, case-insensitively, in
/// their original order. A blank term keeps everything.
pub fn apply_filter(raw: &[Movie], term: &str) -> Vec<Movie> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return raw.to_vec();
    }
    raw.iter()
        .filter(|movie| {
            movie
                .title()
                .is_some_and(|title| title.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Detail overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Visible(Movie),
}

impl Overlay {
    /// Show `movie`, replacing whatever is on display.
    pub fn show(&mut self, movie: Movie) {
        *self = Overlay::Visible(movie);
    }

    pub fn dismiss(&mut self) {
        *self = Overlay::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Overlay::Visible(_))
    }

    pub fn movie(&self) -> Option<&Movie> {
        match self {
            Overlay::Visible(movie) => Some(movie),
            Overlay::Hidden => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titled(title: &str) -> Movie {
        Movie {
            original_title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn page(titles: &[&str], current: u32, last: u32) -> MoviePage {
        MoviePage {
            movies: titles.iter().map(|t| titled(t)).collect(),
            current_page: current,
            last_page: last,
        }
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let movies = vec![titled("Alpha"), titled("Beta")];
        let visible = apply_filter(&movies, "bet");
        assert_eq!(visible, vec![titled("Beta")]);
    }

    #[test]
    fn test_filter_blank_term_is_identity() {
        let movies = vec![titled("Alpha"), Movie::default(), titled("Beta")];
        assert_eq!(apply_filter(&movies, ""), movies);
        assert_eq!(apply_filter(&movies, "   \t"), movies);
    }

    #[test]
    fn test_filter_trims_term() {
        let movies = vec![titled("Alpha"), titled("Beta")];
        assert_eq!(apply_filter(&movies, "  ALP "), vec![titled("Alpha")]);
    }

    #[test]
    fn test_filter_skips_untitled_movies() {
        let movies = vec![Movie::default(), titled(""), titled("Untitled Project")];
        assert_eq!(apply_filter(&movies, "t"), vec![titled("Untitled Project")]);
    }

    #[test]
    fn test_new_state_is_idle_until_a_page_lands() {
        let state = PageState::new();
        assert_eq!(state.status, LoadStatus::Idle);
        assert_eq!((state.current_page, state.last_page), (1, 1));
        assert!(state.visible_movies.is_empty());
        assert!(!state.can_go_prev());
        assert!(!state.can_go_next());
        assert_eq!(state.page_label(), "");
    }

    #[test]
    fn test_apply_page_replaces_movies_and_keeps_search() {
        let mut state = PageState::new();
        state.set_search("dune");
        state.apply_page(page(&["Dune", "Alien"], 1, 5));
        assert_eq!(state.visible_movies, vec![titled("Dune")]);

        state.apply_page(page(&["Heat"], 2, 5));
        assert_eq!(state.raw_movies, vec![titled("Heat")]);
        assert!(state.visible_movies.is_empty());
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_pagination_bounds() {
        let mut state = PageState::new();
        state.apply_page(page(&[], 1, 5));
        assert!(!state.can_go_prev());
        assert!(state.can_go_next());
        assert_eq!(state.page_label(), "Page 1 of 5");

        state.apply_page(page(&[], 3, 5));
        assert!(state.can_go_prev());
        assert!(state.can_go_next());

        state.apply_page(page(&[], 5, 5));
        assert!(state.can_go_prev());
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_failure_keeps_page_numbers_and_disables_navigation() {
        let mut state = PageState::new();
        state.apply_page(page(&["Dune"], 3, 5));
        state.apply_failure(&LoadError::Status(500));

        assert_eq!(state.current_page, 3);
        assert_eq!(state.last_page, 5);
        assert!(!state.can_go_prev());
        assert!(!state.can_go_next());
        assert_eq!(state.page_label(), "");
        assert_eq!(
            state.status,
            LoadStatus::Failed("Failed to fetch movies (HTTP 500)".to_string())
        );
    }

    #[test]
    fn test_overlay_transitions() {
        let mut overlay = Overlay::default();
        assert!(!overlay.is_visible());

        overlay.show(titled("Dune"));
        assert_eq!(overlay.movie().and_then(Movie::title), Some("Dune"));

        overlay.show(titled("Heat"));
        assert_eq!(overlay.movie().and_then(Movie::title), Some("Heat"));

        overlay.dismiss();
        assert_eq!(overlay, Overlay::Hidden);
        overlay.dismiss();
        assert_eq!(overlay, Overlay::Hidden);
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subsequence(
            titles in proptest::collection::vec(proptest::option::of("[a-zA-Z ]{0,12}"), 0..20),
            term in "[a-zA-Z]{1,3}",
        ) {
            let movies: Vec<Movie> = titles
                .iter()
                .map(|t| Movie { original_title: t.clone(), ..Default::default() })
                .collect();
            let needle = term.to_lowercase();
            let expected: Vec<Movie> = movies
                .iter()
                .filter(|m| m.original_title.as_deref().is_some_and(|t| t.to_lowercase().contains(&needle)))
                .cloned()
                .collect();
            prop_assert_eq!(apply_filter(&movies, &term), expected);
        }

        #[test]
        fn prop_blank_filter_returns_input(
            titles in proptest::collection::vec(proptest::option::of("[a-z]{0,8}"), 0..20),
            blank in "[ \t]{0,4}",
        ) {
            let movies: Vec<Movie> = titles
                .iter()
                .map(|t| Movie { original_title: t.clone(), ..Default::default() })
                .collect();
            prop_assert_eq!(apply_filter(&movies, &blank), movies);
        }
    }
}
