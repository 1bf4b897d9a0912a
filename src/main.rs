use anyhow::Result;

mod app;
mod assistant;
mod config;
mod handler;
mod questions;
mod stats;
mod store;
mod tui;
mod ui;

use app::App;
use config::Config;
use store::FixtureStore;

#[tokio::main]
async fn main() -> Result<()> {
    let store = FixtureStore::load_embedded()?;
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let mut app = App::new(store, &config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run(&mut terminal, &mut app).await;

    tui::restore()?;

    // Reopen on the screen the user quit from
    let _ = Config::save_start_screen(app.screen.name());

    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event).await?;
        }
    }

    Ok(())
}
