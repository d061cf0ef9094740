use std::path::PathBuf;

use sm_app::actions::{dispatch, AppAction};
use sm_app::sample::demo_items;
use sm_app::state::AppState;
use tracing_subscriber::EnvFilter;

const DEMO_ITEM_COUNT: usize = 10_000;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let mut state = AppState::new();
    let startup = match std::env::args_os().nth(1) {
        Some(path) => AppAction::LoadDocument(PathBuf::from(path)),
        None => AppAction::ReplaceItems(demo_items(DEMO_ITEM_COUNT)),
    };
    if let Err(err) = dispatch(&mut state, startup) {
        tracing::error!(error = %err, "startup document failed to load");
        state.status = err.to_string();
    }

    sm_app::launch(state)
}
