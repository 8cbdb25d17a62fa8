//! A spinning-wheel picker for the terminal.
//!
//! Load a list of names, spin, and the wheel lands on a random one.  Winners
//! are recorded (and optionally taken off the wheel); the record is printed
//! to stdout on exit so it can be piped or saved.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    audio::AudioCues,
    event::{frame_clock, spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, Focus},
};
use crate::config::{Action, AppConfig};
use crate::core::picker::Picker;
use crate::ui::{
    input::{AddField, ControlBar},
    layout::AppLayout,
    popup,
    spinner::SpinIndicator,
    theme::Theme,
    wheel_widget::WheelWidget,
    winners::WinnersPanel,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Spinning-wheel picker")]
struct Cli {
    /// File with one item per line to put on the wheel.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Add an item (repeatable); appended after the file's items.
    #[arg(short = 'i', long = "item", value_name = "TEXT")]
    items: Vec<String>,

    /// Remove each winner from the wheel as soon as it is picked.
    #[arg(long)]
    auto_remove: bool,

    /// Never play audio cues.
    #[arg(long)]
    mute: bool,

    /// Seed the random picker for reproducible draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default config file and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let config = &state.config;
    let picker = &state.picker;

    let wheel_block = Block::default()
        .title(format!(" {} ", picker.count_label()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if state.focus == Focus::Wheel {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        });
    let empty_hint = format!(
        "No items. {}: add, {}: bulk load",
        config.short_binding(Action::FocusAdd),
        config.short_binding(Action::BulkLoad),
    );
    frame.render_widget(
        WheelWidget::new(picker.wheel())
            .block(wheel_block)
            .empty_hint(empty_hint),
        layout.wheel_area,
    );
    frame.render_widget(
        SpinIndicator {
            progress: picker.spin_progress(Instant::now()),
            frame: state.frame,
        },
        layout.wheel_area,
    );

    let winners_block = Block::default()
        .title(format!(
            " Winners ({}) [{}] {} ",
            picker.winners().len(),
            config.short_binding(Action::ToggleWinners),
            state.winners_toggle_label(),
        ))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(
        WinnersPanel {
            block: winners_block,
            winners: picker.winners(),
            visible: state.show_winners,
            actions_hint: format!(
                "{}: clear  {}: remove from wheel",
                config.short_binding(Action::ClearWinners),
                config.short_binding(Action::RemoveWinners),
            ),
            show_hint: format!("hidden ({} to show)", config.short_binding(Action::ToggleWinners)),
        },
        layout.winners_area,
    );

    frame.render_widget(
        AddField {
            text: &state.add_input,
            focused: state.focus == Focus::AddField,
            placeholder: format!(
                "{} to type an item, Enter to add",
                config.short_binding(Action::FocusAdd)
            ),
        },
        layout.input_area,
    );

    frame.render_widget(
        ControlBar {
            spin_key: config.short_binding(Action::Spin),
            spin_label: state.spin_label(),
            spin_enabled: picker.can_spin(),
            auto_key: config.short_binding(Action::ToggleAutoRemove),
            auto_label: state.auto_remove_label(),
            auto_on: picker.auto_remove(),
            winners_key: config.short_binding(Action::ToggleWinners),
            winners_label: state.winners_toggle_label(),
            count_label: picker.count_label(),
        },
        layout.controls_area,
    );

    let hint = config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::BulkLoad => {
            frame.render_widget(popup::BulkLoadPopup { text: &state.bulk_input }, frame.area());
        }
        ActiveView::Help => {
            frame.render_widget(popup::HelpPopup { config }, frame.area());
        }
        ActiveView::Wheel => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default().serialise());
        return Ok(());
    }

    // ── initial picker ────────────────────────────────────────
    let mut config = AppConfig::load();
    if cli.auto_remove {
        config.auto_remove = true;
    }
    if cli.mute {
        config.sound = false;
    }

    let mut picker = match cli.seed {
        Some(seed) => Picker::seeded(seed),
        None => Picker::new(),
    };
    picker.set_auto_remove(config.auto_remove);

    let mut initial = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading items from {}", path.display()))?,
        None => String::new(),
    };
    for item in &cli.items {
        initial.push('\n');
        initial.push_str(item);
    }
    if !initial.trim().is_empty() {
        picker
            .load(&initial)
            .context("loading initial items")?;
    }

    let audio = if config.sound {
        AudioCues::spawn(config.tick_sound.clone(), config.spin_sound.clone())
    } else {
        AudioCues::disabled()
    };
    let frame_ms = config.frame_ms;
    let mut state = AppState::new(picker, config, audio);
    state.bulk_input = initial.trim_start_matches('\n').to_string();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(250));
    let mut frames = frame_clock(frame_ms);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &state);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Paste(text) => handler::handle_paste(&mut state, &text),
                    // Redrawn at the top of the loop.
                    AppEvent::Resize | AppEvent::Tick => {}
                }
            }

            // Frames only run while a spin is in flight.
            _ = frames.tick(), if state.picker.is_spinning() => {
                handler::on_frame(&mut state, Instant::now());
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    print_winners(&state)?;

    Ok(())
}

/// Write the winners record to stdout, one per line.
fn print_winners(state: &AppState) -> Result<()> {
    let mut out = io::stdout().lock();
    for winner in state.picker.winners().entries() {
        writeln!(out, "{}", winner.name)?;
    }
    out.flush()?;
    Ok(())
}
