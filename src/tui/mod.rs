pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::client::CatalogClient;
use crate::config::Config;
use crate::paths::AppPaths;
use crate::platform::{ClipboardShare, SystemOpener};
use crate::presenter;
use crate::store::{BookStore, Theme};

use action::{Action, AppEvent};
use handlers::{handle_app_event, handle_key_event};
use state::AppState;
use view::draw;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::{env, io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Folio - Book Catalog Browser");
    println!("----------------------------------------");
    println!("Usage: folio [OPTIONS]");
    println!();
    match Config::get_path_string() {
        Ok(path) => println!("Configuration File (optional): {}", path),
        Err(_) => println!("Configuration Path: ~/.config/folio/config.toml (Standard XDG)"),
    }
    if let Ok(path) = AppPaths::get_log_file_path() {
        println!("Log File: {}", path.display());
    }
    println!();
    println!("Config Options:");
    println!("  catalog_url = \"https://www.googleapis.com/books/v1\"");
    println!("  default_query = \"fiction\"");
    println!("  dark_theme = false");
    println!("  allow_insecure_certs = false");
    println!("  log_level = \"info\" (FOLIO_LOG overrides)");
}

/// Routes `log` records to a file; stdout belongs to the terminal UI.
fn init_logging(config: &Config) {
    let Ok(path) = AppPaths::get_log_file_path() else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_new(config.log_level.as_deref().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

pub async fn run() -> Result<()> {
    // --- 1. PREAMBLE & CONFIG ---
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    let config = Config::load_or_default();
    init_logging(&config);
    log::info!("Starting folio against {}", config.catalog_url);

    let client = match CatalogClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            let path_str = Config::get_path_string()
                .unwrap_or_else(|_| "[Could not determine config path]".to_string());
            eprintln!("Cannot start: {}", e);
            eprintln!("Please check 'catalog_url' in:");
            eprintln!("  {}", path_str);
            return Ok(());
        }
    };

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let store = BookStore::new(
        &config.default_query,
        Theme::from_dark_flag(config.dark_theme),
    );
    let mut app_state = AppState::new(store);

    let (action_tx, mut action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    if let Some(ticket) = app_state.store.begin_default_load() {
        let _ = action_tx.send(Action::Search(ticket)).await;
    }

    // --- 4. NETWORK THREAD ---
    tokio::spawn(async move {
        while let Some(action) = action_rx.recv().await {
            match action {
                Action::Quit => break,

                // Searches run side by side; the store drops stale answers.
                Action::Search(ticket) => {
                    let client = client.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let outcome = client.search_volumes(ticket.query()).await;
                        let _ = tx.send(AppEvent::SearchFinished(ticket, outcome)).await;
                    });
                }

                Action::OpenUrl(url) => {
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let opened = tokio::task::spawn_blocking(move || {
                            presenter::open_external(&SystemOpener::default(), Some(url.as_str()))
                        })
                        .await
                        .unwrap_or(false);
                        if opened {
                            let _ = tx
                                .send(AppEvent::Status("Opened in browser.".to_string()))
                                .await;
                        }
                    });
                }

                Action::Share(book) => {
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let title = book.title.clone();
                        let shared = tokio::task::spawn_blocking(move || {
                            presenter::share(&ClipboardShare::default(), &book)
                        })
                        .await
                        .unwrap_or(false);
                        if shared {
                            let _ = tx
                                .send(AppEvent::Status(format!("Copied \"{}\" to clipboard.", title)))
                                .await;
                        }
                    });
                }
            }
        }
    });

    // --- 5. UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        // A. Network Events
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(&mut app_state, event);
        }

        // B. User Input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = handle_key_event(key, &mut app_state) {
                        let quit = matches!(action, Action::Quit);
                        let _ = action_tx.send(action).await;
                        if quit {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
