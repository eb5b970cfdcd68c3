use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::ShellEffect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::ShellAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::content::ContentStore;
pub(super) use crate::state::Focus;
pub(super) use crate::state::ShellState;
pub(super) use crate::state::Ticket;
pub(super) use crate::state::Timer;
pub(super) use crate::state::WelcomeStage;
pub(super) use crate::state::SKIP_HINT_LINE;
pub(super) use crate::transcript::SEED_LINES;

mod interpreter_commands;
mod welcome_carousel;

fn store() -> ContentStore {
    ContentStore::embedded().expect("embedded content")
}

/// Booted shell with the welcome sequence already skipped.
fn state(store: &ContentStore) -> ShellState {
    let mut state = ShellState::default();
    run_runtime(&mut state, store, RuntimeAction::Boot { skip_welcome: true });
    assert_eq!(state.welcome.stage, WelcomeStage::Done);
    state
}

fn run_user(state: &mut ShellState, store: &ContentStore, action: UserAction) -> Vec<ShellEffect> {
    reduce(state, store, ShellAction::User(action))
}

fn run_runtime(
    state: &mut ShellState,
    store: &ContentStore,
    action: RuntimeAction,
) -> Vec<ShellEffect> {
    reduce(state, store, ShellAction::Runtime(action))
}

fn fire(
    state: &mut ShellState,
    store: &ContentStore,
    ticket: Ticket,
    timer: Timer,
) -> Vec<ShellEffect> {
    run_runtime(state, store, RuntimeAction::TimerFired { ticket, timer })
}

/// Types `text` into the input and presses Enter.
fn submit(state: &mut ShellState, store: &ContentStore, text: &str) -> Vec<ShellEffect> {
    run_user(state, store, UserAction::SetInput(text.to_string()));
    run_user(state, store, UserAction::Enter)
}

/// Submits `text` and lets the simulated latency run out.
fn execute(state: &mut ShellState, store: &ContentStore, text: &str) {
    let effects = submit(state, store, text);
    if let Some(ticket) = scheduled(&effects, Timer::CommandLatency) {
        fire(state, store, ticket, Timer::CommandLatency);
    }
}

fn scheduled(effects: &[ShellEffect], wanted: Timer) -> Option<Ticket> {
    effects.iter().find_map(|effect| match effect {
        ShellEffect::Schedule { ticket, timer, .. } if *timer == wanted => Some(*ticket),
        _ => None,
    })
}

fn cancelled(effects: &[ShellEffect]) -> Vec<Ticket> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            ShellEffect::Cancel { ticket } => Some(*ticket),
            _ => None,
        })
        .collect()
}

fn lines(state: &ShellState) -> Vec<String> {
    state.transcript.to_vec()
}
