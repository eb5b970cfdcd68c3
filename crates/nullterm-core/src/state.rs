use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::transcript::Transcript;
use crate::transcript::DEFAULT_TRANSCRIPT_CAPACITY;

pub const PROCESSING_LINE: &str = "Processing command";
pub const SKIP_HINT_LINE: &str = "💡 Press Enter to skip loading...";
pub const CONNECTED_BANNER: &str = "[CONNECTED TO NULL EEC TERMINAL]";
pub const GREETING_TITLE: &str = "Welcome, visitor! 👋";
pub const GREETING_BODY: &str = "Use the file tree (left) or type 'help' below";
pub const WELCOME_HINT: &str = "💡 Click \"About NULL EEC\" to get started";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiTheme {
    #[default]
    Matrix,
    Cyber,
    Amber,
}

impl UiTheme {
    pub fn next(self) -> Self {
        match self {
            Self::Matrix => Self::Cyber,
            Self::Cyber => Self::Amber,
            Self::Amber => Self::Matrix,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Cyber => "cyber",
            Self::Amber => "amber",
        }
    }
}

impl FromStr for UiTheme {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "matrix" => Ok(Self::Matrix),
            "cyber" => Ok(Self::Cyber),
            "amber" => Ok(Self::Amber),
            _ => Err(ConfigError::UnknownTheme(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Focus {
    Sidebar,
    #[default]
    Input,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Sidebar => Self::Input,
            Self::Input => Self::Sidebar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sidebar => "files",
            Self::Input => "terminal",
        }
    }
}

/// Cosmetic delays, all in milliseconds. None of them affect what a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub command_latency_ms: u64,
    pub skip_hint_ms: u64,
    pub loading_dots_ms: u64,
    pub welcome_connect_ms: u64,
    pub welcome_greeting_ms: u64,
    pub welcome_hint_ms: u64,
    pub welcome_finish_ms: u64,
    pub typewriter_char_ms: u64,
    pub carousel_interval_ms: u64,
}

impl Timing {
    /// First repeating interval set to zero. Repeating timers need a
    /// positive period.
    pub fn zero_interval(&self) -> Option<&'static str> {
        [
            ("loading_dots_ms", self.loading_dots_ms),
            ("typewriter_char_ms", self.typewriter_char_ms),
            ("carousel_interval_ms", self.carousel_interval_ms),
        ]
        .into_iter()
        .find_map(|(field, ms)| (ms == 0).then_some(field))
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            command_latency_ms: 1_500,
            skip_hint_ms: 500,
            loading_dots_ms: 300,
            welcome_connect_ms: 1_000,
            welcome_greeting_ms: 2_000,
            welcome_hint_ms: 2_000,
            welcome_finish_ms: 1_500,
            typewriter_char_ms: 30,
            carousel_interval_ms: 4_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timer {
    CommandLatency,
    SkipHint,
    LoadingDots,
    WelcomeStep,
    Typewriter,
    CarouselAdvance,
}

impl Timer {
    pub fn label(self) -> &'static str {
        match self {
            Self::CommandLatency => "command-latency",
            Self::SkipHint => "skip-hint",
            Self::LoadingDots => "loading-dots",
            Self::WelcomeStep => "welcome-step",
            Self::Typewriter => "typewriter",
            Self::CarouselAdvance => "carousel-advance",
        }
    }
}

/// A submitted command waiting out its simulated latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommand {
    pub raw: String,
    pub latency: Ticket,
    pub hint: Option<Ticket>,
    pub dots: Ticket,
    pub dots_phase: u8,
}

impl PendingCommand {
    pub fn tickets(&self) -> Vec<Ticket> {
        let mut tickets = vec![self.latency, self.dots];
        tickets.extend(self.hint);
        tickets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WelcomeStage {
    #[default]
    Initializing,
    Connected,
    Greeting,
    Hint,
    Done,
}

impl WelcomeStage {
    pub fn next(self) -> Self {
        match self {
            Self::Initializing => Self::Connected,
            Self::Connected => Self::Greeting,
            Self::Greeting => Self::Hint,
            Self::Hint | Self::Done => Self::Done,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Initializing => "> Initializing NULL EEC Terminal...",
            Self::Connected => "> Establishing secure connection...",
            Self::Greeting => "> Loading user interface...",
            Self::Hint => "> Ready.",
            Self::Done => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WelcomeState {
    pub stage: WelcomeStage,
    /// Characters of [`CONNECTED_BANNER`] revealed so far.
    pub revealed: usize,
    pub step: Option<Ticket>,
    pub typewriter: Option<Ticket>,
}

impl WelcomeState {
    pub fn is_active(&self) -> bool {
        self.stage != WelcomeStage::Done
    }

    pub fn banner(&self) -> String {
        CONNECTED_BANNER.chars().take(self.revealed).collect()
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.step.into_iter().chain(self.typewriter).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarouselState {
    pub index: usize,
    pub autoplay: bool,
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    /// Id of the open file; `None` shows the dashboard.
    pub selected: Option<String>,
    pub transcript: Transcript,
    pub input: String,
    pub pending: Option<PendingCommand>,
    pub menu_open: bool,
    pub help_open: bool,
    pub focus: Focus,
    pub sidebar_cursor: usize,
    pub welcome: WelcomeState,
    pub carousel: CarouselState,
    pub content_scroll: u16,
    pub theme: UiTheme,
    pub timing: Timing,
    pub next_ticket: u64,
}

impl ShellState {
    pub fn new(timing: Timing, theme: UiTheme, transcript_capacity: usize) -> Self {
        Self {
            selected: None,
            transcript: Transcript::seeded(transcript_capacity),
            input: String::new(),
            pending: None,
            menu_open: false,
            help_open: false,
            focus: Focus::Input,
            sidebar_cursor: 0,
            welcome: WelcomeState::default(),
            carousel: CarouselState::default(),
            content_scroll: 0,
            theme,
            timing,
            next_ticket: 1,
        }
    }

    pub fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Every ticket the state still expects to fire.
    pub fn live_tickets(&self) -> Vec<Ticket> {
        let mut tickets = self
            .pending
            .as_ref()
            .map(PendingCommand::tickets)
            .unwrap_or_default();
        tickets.extend(self.welcome.tickets());
        tickets.extend(self.carousel.ticket);
        tickets
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(Timing::default(), UiTheme::default(), DEFAULT_TRANSCRIPT_CAPACITY)
    }
}

pub fn processing_line(phase: u8) -> String {
    format!("{PROCESSING_LINE}{}", ".".repeat(usize::from(phase % 4)))
}

pub fn is_loading_line(line: &str) -> bool {
    line.starts_with(PROCESSING_LINE) || line == SKIP_HINT_LINE
}
