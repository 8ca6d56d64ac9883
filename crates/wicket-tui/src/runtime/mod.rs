//! TUI runtime: terminal ownership, the event loop, and effect execution.
//!
//! Everything side-effectful lives behind this boundary. The reducer in
//! `update` only describes what should happen; the runtime makes it
//! happen, then feeds results back in as events.
//!
//! Async results travel through a single unbounded "inbox" channel: a
//! spawned handler sends its `UiEvent` to `inbox_tx`, and the loop drains
//! `inbox_rx` on every iteration. One channel covers every task kind, so
//! there is no per-operation receiver to juggle.
//!
//! - `mod.rs`: the loop, polling cadence, and effect dispatch
//! - `inbox.rs`: inbox channel aliases
//! - `handlers.rs`: the async sign-in handler

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wicket_core::auth::MockAuthenticator;
use wicket_core::config::Config;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while something animates (60fps, ~16ms).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence when nothing is in flight and the keyboard is quiet.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// How long after the last terminal event fast polling is kept up, so
/// bursts of typing render at full rate.
const ACTIVITY_WINDOW: Duration = Duration::from_millis(500);

/// Full-screen TUI runtime.
///
/// Owns the terminal handle and the application state for the lifetime of
/// the session. The terminal is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Spawned handlers report back through this pair.
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// When the previous Tick was emitted.
    last_tick: Instant,
    /// When the last key/mouse/paste event arrived.
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Builds the runtime and takes over the terminal.
    ///
    /// The panic hook goes in before any terminal mutation, so a failure
    /// mid-setup still restores the screen.
    pub fn new(config: Config) -> Result<Self> {
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the reducer asks to quit.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        // First pass must paint the initial card
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick schedules a draw. Input mutates state but its
                // render rides on the next Tick, capping the frame rate.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                // state is a sibling field of terminal, so the draw
                // closure can borrow it while terminal is borrowed mut
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;

                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Gathers one batch of events: inbox results, terminal input, and a
    /// Tick when its interval has elapsed.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Tick fast while the spinner animates or keys are streaming in,
        // slow otherwise so an idle screen costs almost nothing.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < ACTIVITY_WINDOW;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.flow.is_submitting()
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // With results already queued, poll without blocking so they are
        // not delayed; otherwise sleep in poll() until the next tick.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Take whatever else is already buffered
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a handler with the uniform TaskStarted/TaskCompleted
    /// lifecycle around it.
    ///
    /// Started is pushed into the inbox before the spawn, so the reducer
    /// sees it strictly before the matching Completed.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            UiEffect::SpawnAuthenticate { task, request } => {
                let Some(task) = task else {
                    return;
                };
                let auth = MockAuthenticator::from_config(&self.state.tui.config.mock);
                self.spawn_task(TaskKind::Authenticate, task, true, move |cancel| {
                    handlers::authenticate(auth, request, cancel)
                });
            }

            UiEffect::PersistTheme { theme } => {
                // State already holds the new theme; a failed write only
                // costs persistence across restarts
                if let Err(error) = Config::save_theme(theme) {
                    tracing::warn!(%error, "failed to persist theme");
                }
            }

            UiEffect::PersistCredentials { username } => {
                let result = match &username {
                    Some(username) => Config::save_remembered_username(username),
                    None => Config::clear_remembered_username(),
                };
                if let Err(error) = result {
                    tracing::warn!(%error, "failed to persist remembered username");
                }
            }

            // Emitted on Esc to stop an in-flight attempt. The reducer
            // cloned the token; firing it settles the handler.
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
