pub mod chat_panel;
pub mod footer;
pub mod header;
pub mod result_panel;
pub mod upload_panel;

use crate::app::App;
use crate::chat::OutboundTurn;
use crate::errors::TimeWeaverResult;
use crate::gateway::GeminiClient;
use crate::image::{encode_image_file, EncodedImage};
use crate::key_handlers::{handle_key, AppCommand};
use crate::merge::MergeRequest;
use crate::upload::Subject;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{error::Error, io, path::PathBuf, time::Duration};
use tokio::sync::mpsc;

/// Outcome of a spawned gateway or encoder task, delivered back to the event
/// loop. All state mutation happens there, on one logical thread.
#[derive(Debug)]
pub enum AppEvent {
    UploadEncoded {
        subject: Subject,
        outcome: TimeWeaverResult<EncodedImage>,
    },
    MergeCompleted(TimeWeaverResult<EncodedImage>),
    ChatCompleted(TimeWeaverResult<String>),
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(mut app: App, client: GeminiClient) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: GeminiClient,
) -> Result<(), Box<dyn Error>> {
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(100);

    loop {
        // Apply any completed task outcomes before rendering.
        while let Ok(app_event) = event_rx.try_recv() {
            apply_event(app, app_event);
        }

        app.refresh_status();
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = handle_key(app, key) {
                        dispatch(command, &client, &event_tx);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn apply_event(app: &mut App, app_event: AppEvent) {
    match app_event {
        AppEvent::UploadEncoded { subject, outcome } => match outcome {
            Ok(image) => app.slot_populated(subject, image),
            Err(e) => app.slot_failed(subject, e.to_string()),
        },
        AppEvent::MergeCompleted(outcome) => app.merge.complete(outcome),
        AppEvent::ChatCompleted(outcome) => app.chat.complete_send(outcome),
    }
}

/// Spawns the task a command asks for. Outcomes come back as `AppEvent`s so
/// the orchestrators' `complete` transitions run on the event loop no matter
/// how the call ends.
fn dispatch(command: AppCommand, client: &GeminiClient, event_tx: &mpsc::Sender<AppEvent>) {
    match command {
        AppCommand::EncodeUpload { subject, path } => {
            spawn_encode(subject, path, event_tx.clone());
        }
        AppCommand::TriggerMerge(request) => {
            spawn_merge(request, client.clone(), event_tx.clone());
        }
        AppCommand::SendChat(turn) => {
            spawn_chat(turn, client.clone(), event_tx.clone());
        }
    }
}

fn spawn_encode(subject: Subject, path: PathBuf, event_tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = encode_image_file(&path).await;
        let _ = event_tx.send(AppEvent::UploadEncoded { subject, outcome }).await;
    });
}

fn spawn_merge(request: MergeRequest, client: GeminiClient, event_tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = client
            .generate_merged_image(&request.younger, &request.older, &request.prompt)
            .await;
        let _ = event_tx.send(AppEvent::MergeCompleted(outcome)).await;
    });
}

fn spawn_chat(turn: OutboundTurn, client: GeminiClient, event_tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = client.converse(&turn.history, &turn.message).await;
        let _ = event_tx.send(AppEvent::ChatCompleted(outcome)).await;
    });
}

/// Top-level layout: header, three panels, footer.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Min(10),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ]
            .as_ref(),
        )
        .split(chunks[1]);

    upload_panel::draw_upload_panel(f, panels[0], app);
    result_panel::draw_result_panel(f, panels[1], app);
    chat_panel::draw_chat_panel(f, panels[2], app);

    footer::draw_footer(f, chunks[2], app);
}
