use crate::app::{AppMode, AppState};

pub fn focus_search(app: &mut AppState) {
    app.coordinator.activate_search();
    app.mode = AppMode::Search;
}

pub fn blur_search(app: &mut AppState) {
    app.coordinator.deactivate_search();
    app.mode = AppMode::Normal;
}

pub fn type_search_char(app: &mut AppState, c: char) {
    let mut query = app.coordinator.search().query().to_string();
    query.push(c);
    app.result_cursor = 0;
    app.coordinator.set_query(query);
}

pub fn backspace_search(app: &mut AppState) {
    let mut query = app.coordinator.search().query().to_string();
    if query.pop().is_some() {
        app.result_cursor = 0;
        app.coordinator.set_query(query);
    }
}

pub fn next_result(app: &mut AppState) {
    let count = app.coordinator.search().results().len();
    if count > 0 {
        app.result_cursor = (app.result_cursor + 1) % count;
    }
}

pub fn previous_result(app: &mut AppState) {
    let count = app.coordinator.search().results().len();
    if count > 0 {
        app.result_cursor = if app.result_cursor == 0 {
            count - 1
        } else {
            app.result_cursor - 1
        };
    }
}

pub fn select_result(app: &mut AppState) {
    let Some(item) = app
        .coordinator
        .search()
        .results()
        .get(app.result_cursor)
        .cloned()
    else {
        return;
    };
    app.coordinator.select_result(&item);
    app.set_message(format!("Selected {} {}", item.kind.label(), item.name));
}
