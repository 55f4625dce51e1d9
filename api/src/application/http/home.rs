use axum::{Router, extract::State, response::Html, routing::get};

use crate::application::http::server::app_state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../../static/index.html");
const ROOT_PATH_PLACEHOLDER: &str = "{{ROOT_PATH}}";

/// Single page with the meal form; the script posts to the analyze endpoint.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.args.server.root_path))
}

fn render_index(root_path: &str) -> String {
    INDEX_TEMPLATE.replace(ROOT_PATH_PLACEHOLDER, root_path)
}

pub fn home_routes(root_path: &str) -> Router<AppState> {
    let path = if root_path.is_empty() {
        "/".to_string()
    } else {
        root_path.to_string()
    };

    Router::new().route(&path, get(home))
}
