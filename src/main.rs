mod app;
mod catalog;
mod config;
mod logging;
mod timer;
mod tracking;
mod ui;
mod upload;
mod wizard;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::upload::chooser;
use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting on error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg, event_tx.clone());

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });
    drop(event_tx);

    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::ChooseFile { kind, path } => {
                    let file = chooser::inspect(&path).await;
                    state.file_chosen(kind, &path, file);
                }
                Action::External(external) => {
                    tracing::info!(action = external.label(), "external action requested");
                    state.status_message = Some(external.notice().to_string());
                    state.dirty = true;
                }
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            tracing::info!(screen = state.screen.name(), "quit requested");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
