use crate::api::MovieSource;
use crate::app::{App, InputMode};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

pub fn handle_key<S: MovieSource>(app: &mut App<S>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.overlay.is_visible() {
        handle_overlay_key(app, key);
    } else {
        handle_gallery_key(app, key);
    }
}

fn handle_search_input<S: MovieSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

fn handle_overlay_key<S: MovieSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => app.dismiss_overlay(),
        KeyCode::Left | KeyCode::Char('h') => app.overlay_step(-1),
        KeyCode::Right | KeyCode::Char('l') => app.overlay_step(1),
        _ => {}
    }
}

fn handle_gallery_key<S: MovieSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Left | KeyCode::Char('h') => app.select_left(),
        KeyCode::Right | KeyCode::Char('l') => app.select_right(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => app.prev_page(),
        KeyCode::Char('r') => app.retry(),
        // Escape with nothing open is a no-op.
        _ => {}
    }
}

pub fn handle_mouse<S: MovieSource>(app: &mut App<S>, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => click(app, mouse.column, mouse.row),
        MouseEventKind::ScrollDown if !app.overlay.is_visible() => app.select_down(),
        MouseEventKind::ScrollUp if !app.overlay.is_visible() => app.select_up(),
        _ => {}
    }
}

fn click<S: MovieSource>(app: &mut App<S>, column: u16, row: u16) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.overlay.is_visible() {
        let overlay = ui::overlay::overlay_rect(app.area);
        let on_close = ui::overlay::contains(ui::overlay::close_rect(overlay), column, row);
        if on_close || !ui::overlay::contains(overlay, column, row) {
            app.dismiss_overlay();
        }
        return;
    }

    let areas = ui::layout(app.area);
    if ui::overlay::contains(areas.search, column, row) {
        app.input_mode = InputMode::Editing;
        return;
    }
    app.input_mode = InputMode::Normal;

    let (prev, next) = ui::pager_controls(areas.pager);
    if ui::overlay::contains(prev, column, row) {
        app.prev_page();
    } else if ui::overlay::contains(next, column, row) {
        app.next_page();
    } else if let Some(index) = ui::grid::card_at(
        areas.grid,
        app.page.visible_movies.len(),
        app.selected,
        column,
        row,
    ) {
        app.open_movie(index);
    }
}
