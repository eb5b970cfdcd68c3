use super::state::Ticket;
use super::state::Timer;
use super::state::UiTheme;

#[derive(Debug, Clone)]
pub enum ShellAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    InsertChar(char),
    Backspace,
    SetInput(String),
    /// Enter: submits, accelerates a pending command, or opens the
    /// highlighted sidebar entry depending on focus.
    Enter,
    /// Esc: closes the topmost overlay, otherwise clears the input.
    Escape,
    OpenFile(String),
    CursorUp,
    CursorDown,
    ToggleFocus,
    FocusInput,
    ToggleMenu,
    ToggleHelp,
    CarouselNext,
    CarouselPrev,
    ScrollUp,
    ScrollDown,
    CycleTheme,
    SetTheme(UiTheme),
    ShowDashboard,
    SkipWelcome,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
    Boot { skip_welcome: bool },
    TimerFired { ticket: Ticket, timer: Timer },
}
