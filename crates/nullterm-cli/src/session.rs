use std::time::Duration;

use nullterm_core::actions::RuntimeAction;
use nullterm_core::actions::ShellAction;
use nullterm_core::actions::UserAction;
use nullterm_core::content::ContentStore;
use nullterm_core::reducer::reduce;
use nullterm_core::reducer::ShellEffect;
use nullterm_core::state::ShellState;
use nullterm_core::state::Ticket;
use nullterm_core::state::Timer;
use nullterm_exec::Clock;
use nullterm_exec::TimerQueue;
use tracing::debug;
use tracing::info;

/// Owns the state machine and carries out the effects it asks for.
pub struct Session {
    state: ShellState,
    store: ContentStore,
    timers: TimerQueue<Timer>,
    dirty: bool,
    quit: bool,
}

impl Session {
    pub fn new(store: ContentStore, state: ShellState, clock: impl Clock + 'static) -> Self {
        Self {
            state,
            store,
            timers: TimerQueue::new(clock),
            dirty: true,
            quit: false,
        }
    }

    pub fn boot(&mut self, skip_welcome: bool) {
        self.dispatch(ShellAction::Runtime(RuntimeAction::Boot { skip_welcome }));
    }

    pub fn user(&mut self, action: UserAction) {
        self.dispatch(ShellAction::User(action));
    }

    pub fn dispatch(&mut self, action: ShellAction) {
        let effects = reduce(&mut self.state, &self.store, action);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<ShellEffect>) {
        for effect in effects {
            match effect {
                ShellEffect::Schedule {
                    ticket,
                    timer,
                    after_ms,
                } => self
                    .timers
                    .schedule(ticket.0, timer, Duration::from_millis(after_ms)),
                ShellEffect::Cancel { ticket } => {
                    self.timers.cancel(ticket.0);
                }
                ShellEffect::RequestFrame => self.dirty = true,
                ShellEffect::Quit => {
                    let dropped = self.timers.cancel_all();
                    info!(dropped, "session closing");
                    self.quit = true;
                }
            }
        }
    }

    /// Delivers every timer that is due. Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let due = self.timers.drain_due();
        let count = due.len();
        for fired in due {
            debug!(ticket = fired.ticket, timer = fired.payload.label(), "timer fired");
            self.dispatch(ShellAction::Runtime(RuntimeAction::TimerFired {
                ticket: Ticket(fired.ticket),
                timer: fired.payload,
            }));
        }
        count
    }

    /// How long the event loop may block before the next timer is due.
    pub fn poll_timeout(&self, max: Duration) -> Duration {
        self.timers
            .time_until_next()
            .map_or(max, |wait| wait.min(max))
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }
}
