mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{self, AppSettings, CliAction};
use crate::state::loader::{LoaderWorker, LoadingState};
use crate::state::messages::{LoadRequest, LoadResponse, UiEvent};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(overrides) = handle_cli_args() else {
        return Ok(());
    };

    let mut settings = AppSettings::load();
    settings.apply(overrides);

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);

    let sources = settings.sources.clone();
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (load_req_tx, load_req_rx) = mpsc::channel::<LoadRequest>(10);
    let (load_resp_tx, load_resp_rx) = mpsc::channel::<LoadResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Dataset loader thread
    let loader_worker = LoaderWorker::new(sources, load_req_rx, load_resp_tx);
    let loader_task = tokio::spawn(loader_worker.run());

    // Trigger dataset load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, load_req_tx, load_resp_rx).await;

    input_handler.abort();
    loader_task.abort();

    Ok(())
}

/// `None` when the process should exit without starting the UI.
fn handle_cli_args() -> Option<app_settings::CliOverrides> {
    match app_settings::parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(overrides)) => Some(overrides),
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(CliAction::Version) => {
            println!("aotui {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "aotui - Australian Open results explorer

Usage:
  aotui [--matches <path-or-url>] [--world <path-or-url>]
  aotui --help
  aotui --version

Environment:
  AOTUI_MATCHES   Match results CSV (default 10yearAUSOpenMatches.csv)
  AOTUI_WORLD     World country outlines GeoJSON (default world.geojson)
  AOTUI_LOG       Log level for the in-app log pane (default error)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    load_requests: mpsc::Sender<LoadRequest>,
    mut load_responses: mpsc::Receiver<LoadResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &load_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = load_responses.recv() => {
                handle_load_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    load_requests: &mpsc::Sender<LoadRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = load_requests.send(LoadRequest::LoadDataset).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_load_response(response: LoadResponse, app: &Arc<Mutex<App>>, loading: &mut LoadingState) {
    match response {
        LoadResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        LoadResponse::DatasetLoaded { dataset } => {
            info!(
                "loaded {} matches and {} countries",
                dataset.matches.len(),
                dataset.world.countries.len()
            );
            let mut guard = app.lock().await;
            guard.on_dataset_loaded(*dataset);
        }
        LoadResponse::Error { message } => {
            error!("Load error: {message}");
            let mut guard = app.lock().await;
            guard.on_load_failed(message);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Hide);
    let _ = execute!(stdout, terminal::EnterAlternateScreen);
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
