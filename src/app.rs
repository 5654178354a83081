use crate::api::MovieSource;
use crate::gallery::{Overlay, PageState};
use crate::loader::{LoadOutcome, PageLoader};
use crate::ui::grid::GridGeometry;
use crate::view::GalleryView;
use ratatui::layout::Rect;
use tracing::{debug, info};

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state.
pub struct App<S: MovieSource> {
    pub loader: PageLoader<S>,
    pub page: PageState,
    pub overlay: Overlay,
    pub should_quit: bool,
    pub show_help: bool,

    // Grid state
    pub selected: usize,
    pub area: Rect,

    pub input_mode: InputMode,

    // Status message
    pub status_msg: String,
}

impl<S: MovieSource> App<S> {
    pub fn new(loader: PageLoader<S>) -> Self {
        Self {
            loader,
            page: PageState::new(),
            overlay: Overlay::Hidden,
            should_quit: false,
            show_help: false,

            selected: 0,
            area: Rect::default(),

            input_mode: InputMode::Normal,

            status_msg: "Loading movies...".to_string(),
        }
    }

    pub fn view(&self) -> GalleryView {
        GalleryView::build(&self.page, &self.overlay, self.loader.is_busy())
    }

    pub fn grid_geometry(&self) -> GridGeometry {
        GridGeometry::for_area(crate::ui::grid_area(self.area))
    }

    /// Request `page` from the API.
    pub fn load_page(&mut self, page: u32) {
        self.loader.load(page);
        self.status_msg = format!("Loading page {page}...");
    }

    pub fn next_page(&mut self) {
        if self.page.can_go_next() {
            self.load_page(self.page.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.page.can_go_prev() {
            self.load_page(self.page.current_page - 1);
        }
    }

    /// Re-request the last page asked for, e.g. after a failure.
    pub fn retry(&mut self) {
        let page = self.loader.last_requested().unwrap_or(self.page.current_page);
        self.load_page(page);
    }

    /// Apply a finished request unless a newer one has been issued since.
    pub fn handle_outcome(&mut self, outcome: LoadOutcome) {
        if !self.loader.is_current(&outcome) {
            debug!(seq = outcome.seq, page = outcome.page, "dropping stale page result");
            return;
        }
        match outcome.result {
            Ok(page) => {
                info!(
                    page = page.current_page,
                    last_page = page.last_page,
                    movies = page.movies.len(),
                    "page loaded"
                );
                self.page.apply_page(page);
                self.selected = 0;
                self.status_msg = format!("{} movies on this page", self.page.raw_movies.len());
            }
            Err(e) => {
                self.page.apply_failure(&e);
                self.selected = 0;
                self.status_msg = "Load failed, press r to retry".to_string();
            }
        }
    }

    // ── Search ──

    pub fn search_push(&mut self, c: char) {
        let mut term = std::mem::take(&mut self.page.search_term);
        term.push(c);
        self.set_search(term);
    }

    pub fn search_pop(&mut self) {
        let mut term = std::mem::take(&mut self.page.search_term);
        term.pop();
        self.set_search(term);
    }

    /// Explicit submission; same result as the live filter.
    pub fn submit_search(&mut self) {
        let term = self.page.search_term.clone();
        self.set_search(term);
        self.input_mode = InputMode::Normal;
    }

    fn set_search(&mut self, term: String) {
        self.page.set_search(term);
        self.selected = 0;
        self.status_msg = format!(
            "{} of {} movies match \"{}\"",
            self.page.visible_movies.len(),
            self.page.raw_movies.len(),
            self.page.search_term.trim()
        );
    }

    // ── Grid selection ──

    fn move_selection(&mut self, delta: isize) {
        let count = self.page.visible_movies.len();
        if count == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        if (0..count as isize).contains(&target) {
            self.selected = target as usize;
        }
    }

    pub fn select_left(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_right(&mut self) {
        self.move_selection(1);
    }

    pub fn select_up(&mut self) {
        let columns = self.grid_geometry().columns as isize;
        self.move_selection(-columns);
    }

    pub fn select_down(&mut self) {
        let columns = self.grid_geometry().columns as isize;
        self.move_selection(columns);
    }

    // ── Overlay ──

    /// Open the detail overlay for the visible movie at `index`.
    pub fn open_movie(&mut self, index: usize) {
        if let Some(movie) = self.page.visible_movies.get(index) {
            debug!(index, id = ?movie.id, "showing movie detail");
            self.selected = index;
            self.overlay.show(movie.clone());
        }
    }

    pub fn open_selected(&mut self) {
        self.open_movie(self.selected);
    }

    /// Swap the overlay to a neighbouring movie without closing it.
    pub fn overlay_step(&mut self, delta: isize) {
        if !self.overlay.is_visible() {
            return;
        }
        let target = self.selected as isize + delta;
        if target >= 0 {
            self.open_movie(target as usize);
        }
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay.dismiss();
    }
}
