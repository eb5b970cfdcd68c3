use tracing::debug;
use tracing::info;
use tracing::warn;

use super::actions::RuntimeAction;
use super::actions::ShellAction;
use super::actions::UserAction;
use super::content::ContentStore;
use super::interpreter::interpret;
use super::interpreter::sidebar_open_line;
use super::interpreter::TranscriptEdit;
use super::render::carousel_len;
use super::state::is_loading_line;
use super::state::processing_line;
use super::state::CarouselState;
use super::state::Focus;
use super::state::PendingCommand;
use super::state::ShellState;
use super::state::Ticket;
use super::state::Timer;
use super::state::WelcomeStage;
use super::state::CONNECTED_BANNER;
use super::state::PROCESSING_LINE;
use super::state::SKIP_HINT_LINE;

/// Side effects the host must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    Schedule {
        ticket: Ticket,
        timer: Timer,
        after_ms: u64,
    },
    Cancel {
        ticket: Ticket,
    },
    RequestFrame,
    Quit,
}

pub fn reduce(
    state: &mut ShellState,
    store: &ContentStore,
    action: ShellAction,
) -> Vec<ShellEffect> {
    match action {
        ShellAction::User(user) => reduce_user(state, store, user),
        ShellAction::Runtime(runtime) => reduce_runtime(state, store, runtime),
    }
}

fn reduce_user(
    state: &mut ShellState,
    store: &ContentStore,
    action: UserAction,
) -> Vec<ShellEffect> {
    let mut effects = Vec::new();

    if state.welcome.is_active() && action != UserAction::Quit {
        skip_welcome(state, &mut effects);
        effects.push(ShellEffect::RequestFrame);
        return effects;
    }

    match action {
        UserAction::InsertChar(ch) => {
            state.focus = Focus::Input;
            state.input.push(ch);
        }
        UserAction::Backspace => {
            state.input.pop();
        }
        UserAction::SetInput(text) => {
            state.focus = Focus::Input;
            state.input = text;
        }
        UserAction::Enter => {
            if state.pending.is_some() {
                finish_pending(state, store, None, &mut effects);
            } else if state.focus == Focus::Sidebar {
                if let Some(file) = store.at(state.sidebar_cursor) {
                    let id = file.id.clone();
                    open_from_sidebar(state, store, &id, &mut effects);
                }
            } else {
                submit(state, &mut effects);
            }
        }
        UserAction::Escape => {
            if state.help_open {
                state.help_open = false;
            } else if state.menu_open {
                state.menu_open = false;
            } else {
                state.input.clear();
            }
        }
        UserAction::OpenFile(id) => open_from_sidebar(state, store, &id, &mut effects),
        UserAction::CursorUp => {
            state.focus = Focus::Sidebar;
            let len = store.len();
            state.sidebar_cursor = (state.sidebar_cursor + len - 1) % len;
        }
        UserAction::CursorDown => {
            state.focus = Focus::Sidebar;
            state.sidebar_cursor = (state.sidebar_cursor + 1) % store.len();
        }
        UserAction::ToggleFocus => state.focus = state.focus.toggle(),
        UserAction::FocusInput => state.focus = Focus::Input,
        UserAction::ToggleMenu => state.menu_open = !state.menu_open,
        UserAction::ToggleHelp => state.help_open = !state.help_open,
        UserAction::CarouselNext => step_carousel(state, store, true, &mut effects),
        UserAction::CarouselPrev => step_carousel(state, store, false, &mut effects),
        UserAction::ScrollUp => state.content_scroll = state.content_scroll.saturating_sub(3),
        UserAction::ScrollDown => state.content_scroll = state.content_scroll.saturating_add(3),
        UserAction::CycleTheme => state.theme = state.theme.next(),
        UserAction::SetTheme(theme) => state.theme = theme,
        UserAction::ShowDashboard => {
            if let Some(ticket) = state.carousel.ticket.take() {
                effects.push(ShellEffect::Cancel { ticket });
            }
            state.selected = None;
            state.carousel = CarouselState::default();
            state.content_scroll = 0;
        }
        UserAction::SkipWelcome => {}
        UserAction::Quit => {
            let tickets = state.live_tickets();
            info!(timers = tickets.len(), "shutting down shell");
            effects.extend(tickets.into_iter().map(|ticket| ShellEffect::Cancel { ticket }));
            state.pending = None;
            state.welcome.step = None;
            state.welcome.typewriter = None;
            state.carousel.ticket = None;
            effects.push(ShellEffect::Quit);
            return effects;
        }
    }

    effects.push(ShellEffect::RequestFrame);
    effects
}

fn reduce_runtime(
    state: &mut ShellState,
    store: &ContentStore,
    action: RuntimeAction,
) -> Vec<ShellEffect> {
    let mut effects = Vec::new();
    match action {
        RuntimeAction::Boot { skip_welcome } => {
            info!(skip_welcome, "shell booted");
            if skip_welcome {
                state.welcome.stage = WelcomeStage::Done;
                state.welcome.revealed = CONNECTED_BANNER.chars().count();
            } else {
                state.welcome.stage = WelcomeStage::Initializing;
                let delay = state.timing.welcome_connect_ms;
                state.welcome.step = Some(schedule(state, Timer::WelcomeStep, delay, &mut effects));
            }
        }
        RuntimeAction::TimerFired { ticket, timer } => {
            if !fire_timer(state, store, ticket, timer, &mut effects) {
                warn!(ticket = ticket.0, timer = timer.label(), "ignoring stale timer");
                return effects;
            }
        }
    }
    effects.push(ShellEffect::RequestFrame);
    effects
}

fn schedule(
    state: &mut ShellState,
    timer: Timer,
    after_ms: u64,
    effects: &mut Vec<ShellEffect>,
) -> Ticket {
    let ticket = state.issue_ticket();
    debug!(ticket = ticket.0, timer = timer.label(), after_ms, "scheduling timer");
    effects.push(ShellEffect::Schedule {
        ticket,
        timer,
        after_ms,
    });
    ticket
}

/// Returns false when `ticket` is not the one the state is waiting on.
fn fire_timer(
    state: &mut ShellState,
    store: &ContentStore,
    ticket: Ticket,
    timer: Timer,
    effects: &mut Vec<ShellEffect>,
) -> bool {
    match timer {
        Timer::CommandLatency => {
            if state.pending.as_ref().map(|pending| pending.latency) != Some(ticket) {
                return false;
            }
            finish_pending(state, store, Some(ticket), effects);
        }
        Timer::SkipHint => {
            let Some(pending) = state.pending.as_mut() else {
                return false;
            };
            if pending.hint != Some(ticket) {
                return false;
            }
            pending.hint = None;
            state.transcript.push(SKIP_HINT_LINE);
        }
        Timer::LoadingDots => {
            if state.pending.as_ref().map(|pending| pending.dots) != Some(ticket) {
                return false;
            }
            let delay = state.timing.loading_dots_ms;
            let next = schedule(state, Timer::LoadingDots, delay, effects);
            if let Some(pending) = state.pending.as_mut() {
                pending.dots = next;
                pending.dots_phase = (pending.dots_phase + 1) % 4;
                let line = processing_line(pending.dots_phase);
                state
                    .transcript
                    .replace_last_if(|existing| existing.starts_with(PROCESSING_LINE), line);
            }
        }
        Timer::WelcomeStep => {
            if state.welcome.step != Some(ticket) {
                return false;
            }
            advance_welcome(state, effects);
        }
        Timer::Typewriter => {
            if state.welcome.typewriter != Some(ticket) {
                return false;
            }
            state.welcome.revealed += 1;
            state.welcome.typewriter = None;
            if state.welcome.revealed < CONNECTED_BANNER.chars().count() {
                let delay = state.timing.typewriter_char_ms;
                state.welcome.typewriter = Some(schedule(state, Timer::Typewriter, delay, effects));
            }
        }
        Timer::CarouselAdvance => {
            if state.carousel.ticket != Some(ticket) {
                return false;
            }
            state.carousel.ticket = None;
            let len = selected_carousel_len(state, store);
            if len == 0 || !state.carousel.autoplay {
                return true;
            }
            state.carousel.index = (state.carousel.index + 1) % len;
            let delay = state.timing.carousel_interval_ms;
            state.carousel.ticket = Some(schedule(state, Timer::CarouselAdvance, delay, effects));
        }
    }
    true
}

fn submit(state: &mut ShellState, effects: &mut Vec<ShellEffect>) {
    let raw = state.input.trim().to_string();
    state.input.clear();
    if raw.is_empty() {
        return;
    }

    state.transcript.push(format!("> {raw}"));
    state.transcript.push(processing_line(0));

    let latency = state.timing.command_latency_ms;
    let hint = state.timing.skip_hint_ms;
    let dots = state.timing.loading_dots_ms;
    let latency = schedule(state, Timer::CommandLatency, latency, effects);
    let hint = schedule(state, Timer::SkipHint, hint, effects);
    let dots = schedule(state, Timer::LoadingDots, dots, effects);
    debug!(command = %raw, "command pending");
    state.pending = Some(PendingCommand {
        raw,
        latency,
        hint: Some(hint),
        dots,
        dots_phase: 0,
    });
}

/// Runs the pending command exactly once. `fired` is the latency ticket when
/// completion is natural; it is not cancelled since it already fired.
fn finish_pending(
    state: &mut ShellState,
    store: &ContentStore,
    fired: Option<Ticket>,
    effects: &mut Vec<ShellEffect>,
) {
    let Some(pending) = state.pending.take() else {
        return;
    };
    for ticket in pending.tickets() {
        if Some(ticket) != fired {
            effects.push(ShellEffect::Cancel { ticket });
        }
    }
    if fired.is_none() {
        debug!(command = %pending.raw, "loading skipped");
    }
    state.transcript.retain(|line| !is_loading_line(line));

    let result = interpret(&pending.raw, store);
    match result.edit {
        TranscriptEdit::Nothing => {}
        TranscriptEdit::Append(lines) => state.transcript.extend(lines),
        TranscriptEdit::Clear => state.transcript.clear(),
    }
    if let Some(id) = result.selection {
        select(state, store, &id, effects);
    }
}

fn open_from_sidebar(
    state: &mut ShellState,
    store: &ContentStore,
    id: &str,
    effects: &mut Vec<ShellEffect>,
) {
    let Some(file) = store.get(id) else {
        warn!(id, "sidebar asked for unknown file");
        return;
    };
    state.transcript.push(sidebar_open_line(&file.name));
    select(state, store, id, effects);
}

fn select(state: &mut ShellState, store: &ContentStore, id: &str, effects: &mut Vec<ShellEffect>) {
    let Some(file) = store.get(id) else {
        return;
    };
    info!(id, name = %file.name, "file selected");
    state.selected = Some(file.id.clone());
    state.menu_open = false;
    state.content_scroll = 0;
    if let Some(position) = store.position(id) {
        state.sidebar_cursor = position;
    }

    if let Some(ticket) = state.carousel.ticket.take() {
        effects.push(ShellEffect::Cancel { ticket });
    }
    let slides = carousel_len(file);
    state.carousel = CarouselState {
        index: 0,
        autoplay: slides > 1,
        ticket: None,
    };
    if state.carousel.autoplay {
        let delay = state.timing.carousel_interval_ms;
        state.carousel.ticket = Some(schedule(state, Timer::CarouselAdvance, delay, effects));
    }
}

fn selected_carousel_len(state: &ShellState, store: &ContentStore) -> usize {
    state
        .selected
        .as_deref()
        .and_then(|id| store.get(id))
        .map(carousel_len)
        .unwrap_or(0)
}

/// Manual navigation wraps and permanently stops autoplay for this selection.
fn step_carousel(
    state: &mut ShellState,
    store: &ContentStore,
    forward: bool,
    effects: &mut Vec<ShellEffect>,
) {
    let len = selected_carousel_len(state, store);
    if len == 0 {
        return;
    }
    if let Some(ticket) = state.carousel.ticket.take() {
        effects.push(ShellEffect::Cancel { ticket });
    }
    state.carousel.autoplay = false;
    state.carousel.index = if forward {
        (state.carousel.index + 1) % len
    } else {
        (state.carousel.index + len - 1) % len
    };
}

fn advance_welcome(state: &mut ShellState, effects: &mut Vec<ShellEffect>) {
    state.welcome.step = None;
    let next = state.welcome.stage.next();
    debug!(stage = ?next, "welcome stage");
    state.welcome.stage = next;
    let delay = match next {
        WelcomeStage::Initializing | WelcomeStage::Done => None,
        WelcomeStage::Connected => {
            state.welcome.revealed = 0;
            let delay = state.timing.typewriter_char_ms;
            state.welcome.typewriter = Some(schedule(state, Timer::Typewriter, delay, effects));
            Some(state.timing.welcome_greeting_ms)
        }
        WelcomeStage::Greeting => {
            finish_typewriter(state, effects);
            Some(state.timing.welcome_hint_ms)
        }
        WelcomeStage::Hint => Some(state.timing.welcome_finish_ms),
    };
    if let Some(delay) = delay {
        state.welcome.step = Some(schedule(state, Timer::WelcomeStep, delay, effects));
    }
}

fn finish_typewriter(state: &mut ShellState, effects: &mut Vec<ShellEffect>) {
    if let Some(ticket) = state.welcome.typewriter.take() {
        effects.push(ShellEffect::Cancel { ticket });
    }
    state.welcome.revealed = CONNECTED_BANNER.chars().count();
}

fn skip_welcome(state: &mut ShellState, effects: &mut Vec<ShellEffect>) {
    if let Some(ticket) = state.welcome.step.take() {
        effects.push(ShellEffect::Cancel { ticket });
    }
    finish_typewriter(state, effects);
    state.welcome.stage = WelcomeStage::Done;
    info!("welcome sequence skipped");
}

#[cfg(test)]
mod tests;
