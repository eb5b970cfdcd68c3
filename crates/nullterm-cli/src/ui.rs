use std::io;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tracing::info;

use nullterm_core::actions::UserAction;
use nullterm_core::content::ContentStore;
use nullterm_core::content::NodeKind;
use nullterm_core::interpreter::HELP_LINES;
use nullterm_core::markup::parse_inline;
use nullterm_core::markup::Inline;
use nullterm_core::render::render_dashboard;
use nullterm_core::render::render_file;
use nullterm_core::render::Block as DocBlock;
use nullterm_core::render::Card;
use nullterm_core::render::Document;
use nullterm_core::state::is_loading_line;
use nullterm_core::state::CarouselState;
use nullterm_core::state::Focus;
use nullterm_core::state::ShellState;
use nullterm_core::state::UiTheme;
use nullterm_core::state::WelcomeStage;
use nullterm_core::state::GREETING_BODY;
use nullterm_core::state::GREETING_TITLE;
use nullterm_core::state::WELCOME_HINT;

use crate::rain::MatrixRain;
use crate::session::Session;

const FRAME: Duration = Duration::from_millis(16);
const ANIMATION_FRAME: Duration = Duration::from_millis(80);
const SIDEBAR_WIDTH: u16 = 30;
const COMPACT_WIDTH: u16 = 80;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const KEY_HELP: [(&str, &str); 12] = [
    ("Enter", "run command, skip loading, open highlighted file"),
    ("1-9", "follow a numbered link card (empty input)"),
    ("Esc", "close overlay or clear input"),
    ("Tab", "switch focus between files and terminal"),
    ("↑ / ↓", "move through the file list"),
    ("← / →", "previous / next photo"),
    ("PgUp / PgDn", "scroll the open file"),
    ("Home", "back to the dashboard"),
    ("Ctrl+K", "focus the terminal input"),
    ("Ctrl+B", "toggle the file menu on narrow terminals"),
    ("Ctrl+T", "cycle theme"),
    ("Ctrl+C", "quit"),
];

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        );
    }
}

pub fn run(session: &mut Session, matrix_rain: bool) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rain = matrix_rain.then(|| MatrixRain::new(rain_seed(), Color::Green));
    run_app(&mut terminal, session, rain)?;
    Ok(())
}

fn rain_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(1)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    mut rain: Option<MatrixRain>,
) -> io::Result<()> {
    let mut last_frame: Option<Duration> = None;
    let mut resized = true;

    loop {
        session.pump();
        if session.should_quit() {
            break;
        }

        let now = session.now();
        let animating = session.state().welcome.is_active() || session.state().is_loading();
        let frame_due = last_frame.map_or(true, |at| now.saturating_sub(at) >= ANIMATION_FRAME);
        let dirty = session.take_dirty();
        if dirty || resized || (animating && frame_due) {
            if let Some(rain) = rain.as_mut() {
                if session.state().welcome.is_active() {
                    let size = terminal.size()?;
                    rain.set_color(palette_for(session.state().theme).accent);
                    rain.tick(Rect::new(0, 0, size.width, size.height));
                }
            }
            let state = session.state();
            let store = session.store();
            let spinner = spinner_frame(now);
            terminal.draw(|f| ui(f, state, store, rain.as_ref(), spinner))?;
            last_frame = Some(now);
            resized = false;
        }

        if event::poll(session.poll_timeout(FRAME))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_action(key, session.state(), session.store()) {
                        session.user(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let action = mouse_action(mouse, area, session.state(), session.store());
                    if let Some(action) = action {
                        session.user(action);
                    }
                }
                Event::Resize(..) => resized = true,
                _ => {}
            }
        }
    }

    info!(pending = session.pending_timers(), "terminal ui closed");
    Ok(())
}

fn spinner_frame(now: Duration) -> &'static str {
    SPINNER[(now.as_millis() / 100) as usize % SPINNER.len()]
}

/// Maps a key press to the action it stands for, if any.
fn key_action(key: KeyEvent, state: &ShellState, store: &ContentStore) -> Option<UserAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(UserAction::Quit);
    }
    if state.welcome.is_active() {
        return Some(UserAction::SkipWelcome);
    }
    if ctrl {
        return match key.code {
            KeyCode::Char('k') => Some(UserAction::FocusInput),
            KeyCode::Char('b') => Some(UserAction::ToggleMenu),
            KeyCode::Char('t') => Some(UserAction::CycleTheme),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(UserAction::Enter),
        KeyCode::Esc => Some(UserAction::Escape),
        KeyCode::Tab | KeyCode::BackTab => Some(UserAction::ToggleFocus),
        KeyCode::Up => Some(UserAction::CursorUp),
        KeyCode::Down => Some(UserAction::CursorDown),
        KeyCode::Left => Some(UserAction::CarouselPrev),
        KeyCode::Right => Some(UserAction::CarouselNext),
        KeyCode::PageUp => Some(UserAction::ScrollUp),
        KeyCode::PageDown => Some(UserAction::ScrollDown),
        KeyCode::Home => Some(UserAction::ShowDashboard),
        KeyCode::F(1) => Some(UserAction::ToggleHelp),
        KeyCode::Backspace => Some(UserAction::Backspace),
        KeyCode::Char('?') if state.input.is_empty() || state.help_open => {
            Some(UserAction::ToggleHelp)
        }
        KeyCode::Char(digit @ '1'..='9') if state.input.is_empty() => {
            Some(link_action(state, store, digit))
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(UserAction::InsertChar(ch))
        }
        _ => None,
    }
}

/// Digit `n` opens the `n`th link card of the visible document. Without such
/// a card the digit is typed.
fn link_action(state: &ShellState, store: &ContentStore, digit: char) -> UserAction {
    let index = digit.to_digit(10).map_or(0, |n| n as usize).saturating_sub(1);
    current_document(state, store)
        .and_then(|doc| doc.link_targets().get(index).map(|id| id.to_string()))
        .map_or(UserAction::InsertChar(digit), UserAction::OpenFile)
}

/// The selected file's document, the dashboard when nothing is selected, or
/// `None` for an empty file.
fn current_document(state: &ShellState, store: &ContentStore) -> Option<Document> {
    match state.selected.as_deref().and_then(|id| store.get(id)) {
        Some(file) => render_file(file),
        None => Some(render_dashboard(store.dashboard(), store)),
    }
}

fn mouse_action(
    mouse: MouseEvent,
    area: Rect,
    state: &ShellState,
    store: &ContentStore,
) -> Option<UserAction> {
    if state.welcome.is_active() {
        return match mouse.kind {
            MouseEventKind::Down(_) => Some(UserAction::SkipWelcome),
            _ => None,
        };
    }
    let panes = panes(area, state);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = sidebar_index_at(&panes, mouse.column, mouse.row) {
                return store.at(index).map(|file| UserAction::OpenFile(file.id.clone()));
            }
            if contains(panes.input, mouse.column, mouse.row) {
                return Some(UserAction::FocusInput);
            }
            None
        }
        MouseEventKind::ScrollUp if contains(panes.content, mouse.column, mouse.row) => {
            Some(UserAction::ScrollUp)
        }
        MouseEventKind::ScrollDown if contains(panes.content, mouse.column, mouse.row) => {
            Some(UserAction::ScrollDown)
        }
        _ => None,
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    accent_alt: Color,
    success: Color,
    warning: Color,
    danger: Color,
    muted: Color,
    border: Color,
    panel_bg: Color,
    selected_bg: Color,
}

fn palette_for(theme: UiTheme) -> UiPalette {
    match theme {
        UiTheme::Matrix => UiPalette {
            accent: Color::LightGreen,
            accent_alt: Color::Green,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::LightRed,
            muted: Color::DarkGray,
            border: Color::Green,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(8, 32, 10),
        },
        UiTheme::Cyber => UiPalette {
            accent: Color::Magenta,
            accent_alt: Color::Cyan,
            success: Color::LightGreen,
            warning: Color::LightYellow,
            danger: Color::LightRed,
            muted: Color::Gray,
            border: Color::Magenta,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(58, 0, 58),
        },
        UiTheme::Amber => UiPalette {
            accent: Color::LightYellow,
            accent_alt: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            muted: Color::Gray,
            border: Color::Yellow,
            panel_bg: Color::Black,
            selected_bg: Color::Rgb(42, 28, 0),
        },
    }
}

struct Panes {
    header: Rect,
    sidebar: Option<Rect>,
    content: Rect,
    transcript: Rect,
    input: Rect,
    footer: Rect,
}

/// Shared by drawing and mouse hit-testing so both agree on geometry.
fn panes(area: Rect, state: &ShellState) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    let body = rows[1];

    let (sidebar, main) = if area.width >= COMPACT_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body);
        (Some(columns[0]), columns[1])
    } else if state.menu_open {
        // Compact layout: the menu covers the body.
        (Some(body), body)
    } else {
        (None, body)
    };

    let stacked = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main);

    Panes {
        header: rows[0],
        sidebar,
        content: stacked[0],
        transcript: stacked[1],
        input: rows[2],
        footer: rows[3],
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

fn sidebar_index_at(panes: &Panes, column: u16, row: u16) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(panes.sidebar?);
    contains(inner, column, row).then(|| usize::from(row - inner.y))
}

fn ui(
    f: &mut Frame,
    state: &ShellState,
    store: &ContentStore,
    rain: Option<&MatrixRain>,
    spinner: &str,
) {
    let palette = palette_for(state.theme);
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(palette.panel_bg)), area);

    if state.welcome.is_active() {
        render_welcome(f, area, state, rain, palette);
        return;
    }

    let panes = panes(area, state);
    render_header(f, panes.header, state, store, palette);
    render_content(f, panes.content, state, store, palette);
    render_transcript(f, panes.transcript, state, spinner, palette);
    if let Some(sidebar) = panes.sidebar {
        if sidebar == panes.content.union(panes.transcript) {
            f.render_widget(Clear, sidebar);
        }
        render_sidebar(f, sidebar, state, store, palette);
    }
    render_input(f, panes.input, state, spinner, palette);
    render_footer(f, panes.footer, state, store, palette);

    if state.help_open {
        render_help(f, area, palette);
    }
}

fn render_welcome(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    rain: Option<&MatrixRain>,
    palette: UiPalette,
) {
    if let Some(rain) = rain {
        f.render_widget(rain, area);
    }

    let stage = state.welcome.stage;
    let mut lines: Vec<Line<'static>> = Vec::new();
    for step in [
        WelcomeStage::Initializing,
        WelcomeStage::Connected,
        WelcomeStage::Greeting,
        WelcomeStage::Hint,
    ] {
        lines.push(Line::from(Span::styled(
            step.label().to_string(),
            Style::default().fg(palette.accent_alt),
        )));
        if step == stage {
            break;
        }
    }
    if stage != WelcomeStage::Initializing {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            state.welcome.banner(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
    }
    if matches!(stage, WelcomeStage::Greeting | WelcomeStage::Hint) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            GREETING_TITLE,
            Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(GREETING_BODY));
    }
    if stage == WelcomeStage::Hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(WELCOME_HINT, Style::default().fg(palette.warning))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key to skip",
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
    )));

    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" NULL EEC ");
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn render_header(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    store: &ContentStore,
    palette: UiPalette,
) {
    let location = state
        .selected
        .as_deref()
        .and_then(|id| store.get(id))
        .map_or_else(|| "~/dashboard".to_string(), |file| format!("~/{}", file.name));
    let line = Line::from(vec![
        Span::styled(
            " NULL EEC Terminal ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ {location} "), Style::default().fg(palette.accent_alt)),
        Span::styled(
            format!("│ theme: {} ", state.theme.label()),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        ),
        area,
    );
}

fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    store: &ContentStore,
    palette: UiPalette,
) {
    let focused = state.focus == Focus::Sidebar;
    let lines: Vec<Line<'static>> = store
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let selected = state.selected.as_deref() == Some(file.id.as_str());
            let marker = if selected { "▸ " } else { "  " };
            let suffix = if file.kind == NodeKind::Folder { "/" } else { "" };
            let mut style = if selected {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.accent_alt)
            };
            if focused && index == state.sidebar_cursor {
                style = style.bg(palette.selected_bg);
            }
            Line::from(Span::styled(
                format!("{marker}{} {}{suffix}", file.icon, file.name),
                style,
            ))
        })
        .collect();

    let border = if focused { palette.accent } else { palette.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Files ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_content(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    store: &ContentStore,
    palette: UiPalette,
) {
    let (title, lines) = match current_document(state, store) {
        Some(doc) => (
            format!(" {} {} ", doc.icon, doc.title),
            document_lines(&doc, &state.carousel, store, palette),
        ),
        None => {
            let name = state
                .selected
                .as_deref()
                .and_then(|id| store.get(id))
                .map_or("", |file| file.name.as_str());
            (
                format!(" {name} "),
                vec![Line::from(Span::styled(
                    "This file is empty.",
                    Style::default().fg(palette.muted),
                ))],
            )
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(title, Style::default().fg(palette.accent)));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.content_scroll, 0)),
        area,
    );
}

fn render_transcript(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    spinner: &str,
    palette: UiPalette,
) {
    let height = usize::from(area.height.saturating_sub(2));
    let skip = state.transcript.len().saturating_sub(height);
    let lines: Vec<Line<'static>> = state
        .transcript
        .lines()
        .skip(skip)
        .map(|line| transcript_line(line, spinner, palette))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Terminal ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn transcript_line(line: &str, spinner: &str, palette: UiPalette) -> Line<'static> {
    if is_loading_line(line) {
        return Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(palette.accent)),
            Span::styled(line.to_string(), Style::default().fg(palette.muted)),
        ]);
    }
    let color = if line.starts_with("> ") {
        palette.accent
    } else if line.starts_with('✓') {
        palette.success
    } else if line.starts_with('❌') {
        palette.danger
    } else if line.starts_with('💡') || line.starts_with('😅') {
        palette.warning
    } else {
        palette.accent_alt
    };
    Line::from(Span::styled(line.to_string(), Style::default().fg(color)))
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    spinner: &str,
    palette: UiPalette,
) {
    let focused = state.focus == Focus::Input;
    let mut spans = vec![
        Span::styled("$ ", Style::default().fg(palette.success).add_modifier(Modifier::BOLD)),
        Span::raw(state.input.clone()),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(palette.accent)));
    }
    let title = if state.is_loading() {
        format!(" {spinner} running · Enter to skip ")
    } else {
        " Input ".to_string()
    };
    let border = if focused { palette.accent } else { palette.border };
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        ),
        area,
    );
}

const FOOTER_HINTS: &str =
    "Enter run · Tab focus · ↑↓ files · 1-9 links · ←→ photos · PgUp/PgDn scroll · ? help";

/// Key hints, or the highlighted file's tooltip while the file list has focus.
fn render_footer(
    f: &mut Frame,
    area: Rect,
    state: &ShellState,
    store: &ContentStore,
    palette: UiPalette,
) {
    let highlighted = match state.focus {
        Focus::Sidebar => store.at(state.sidebar_cursor),
        Focus::Input => None,
    };
    let hint = match highlighted {
        Some(file) if !file.tooltip.is_empty() => Span::styled(
            format!("{} {}: {}", file.icon, file.name, file.tooltip),
            Style::default().fg(palette.warning),
        ),
        _ => Span::styled(FOOTER_HINTS, Style::default().fg(palette.muted)),
    };
    let line = Line::from(vec![
        hint,
        Span::styled(
            format!("  [{}]", state.focus.label()),
            Style::default().fg(palette.accent_alt),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame, area: Rect, palette: UiPalette) {
    let mut lines: Vec<Line<'static>> = HELP_LINES
        .iter()
        .map(|line| {
            Line::from(Span::styled(line.to_string(), Style::default().fg(palette.accent_alt)))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Keys",
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    )));
    for (key, what) in KEY_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<12}"), Style::default().fg(palette.warning)),
            Span::raw(what),
        ]));
    }

    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Help (Esc to close) "),
        ),
        popup,
    );
}

fn inline_spans(
    spans: &mut Vec<Span<'static>>,
    inline: &[Inline],
    base: Style,
    palette: UiPalette,
) {
    for part in inline {
        match part {
            Inline::Text(text) => spans.push(Span::styled(text.clone(), base)),
            Inline::Strong(text) => {
                spans.push(Span::styled(text.clone(), base.add_modifier(Modifier::BOLD)))
            }
            Inline::Code(text) => spans.push(Span::styled(
                text.clone(),
                Style::default().fg(palette.warning).bg(palette.selected_bg),
            )),
        }
    }
}

fn push_with_inline(
    out: &mut Vec<Line<'static>>,
    prefix: Vec<Span<'static>>,
    text: &str,
    base: Style,
    palette: UiPalette,
) {
    let mut spans = prefix;
    inline_spans(&mut spans, &parse_inline(text), base, palette);
    out.push(Line::from(spans));
}

/// Styled lines for a document. A carousel shows only its current slide.
/// Cards with a target are numbered in order for the digit keys.
fn document_lines(
    doc: &Document,
    carousel: &CarouselState,
    store: &ContentStore,
    palette: UiPalette,
) -> Vec<Line<'static>> {
    let base = Style::default().fg(palette.accent_alt);
    let mut out: Vec<Line<'static>> = Vec::new();
    let mut links = 0;
    for block in &doc.blocks {
        match block {
            DocBlock::Hero {
                title,
                subtitle,
                description,
                tagline,
            } => {
                out.push(Line::from(Span::styled(
                    title.to_uppercase(),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )));
                out.push(Line::from(Span::styled(
                    subtitle.clone(),
                    Style::default().fg(palette.success),
                )));
                push_with_inline(&mut out, Vec::new(), description, base, palette);
                if let Some(tagline) = tagline {
                    out.push(Line::from(Span::styled(
                        format!("\"{tagline}\""),
                        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
                    )));
                }
                out.push(Line::from(""));
            }
            DocBlock::Heading { level, text } => {
                let style = match level {
                    1 => Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    2 => Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    _ => Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
                };
                out.push(Line::from(Span::styled(text.clone(), style)));
            }
            DocBlock::Paragraph(inline) => {
                let mut spans = Vec::new();
                inline_spans(&mut spans, inline, base, palette);
                out.push(Line::from(spans));
            }
            DocBlock::Bullet { label, text } => {
                let mut prefix = vec![Span::styled("  • ", Style::default().fg(palette.accent))];
                if let Some(label) = label {
                    prefix.push(Span::styled(
                        format!("{label}: "),
                        base.add_modifier(Modifier::BOLD),
                    ));
                }
                push_with_inline(&mut out, prefix, text, base, palette);
            }
            DocBlock::Numbered { number, text } => {
                let prefix = vec![Span::styled(
                    format!("  {number}. "),
                    Style::default().fg(palette.accent),
                )];
                push_with_inline(&mut out, prefix, text, base, palette);
            }
            DocBlock::Rule => out.push(Line::from(Span::styled(
                "─".repeat(40),
                Style::default().fg(palette.muted),
            ))),
            DocBlock::Code { lines, .. } => {
                for line in lines {
                    out.push(Line::from(vec![
                        Span::styled("  │ ", Style::default().fg(palette.muted)),
                        Span::styled(line.clone(), Style::default().fg(palette.success)),
                    ]));
                }
            }
            DocBlock::Spacer => out.push(Line::from("")),
            DocBlock::Card(card) => {
                let link = card.target.as_deref().map(|target| {
                    links += 1;
                    let name = store.get(target).map_or(target, |file| file.name.as_str());
                    (links, name)
                });
                card_lines(&mut out, card, link, base, palette);
            }
            DocBlock::Stats(cells) => {
                let mut spans = Vec::new();
                for (index, cell) in cells.iter().enumerate() {
                    if index > 0 {
                        spans.push(Span::styled("  │  ", Style::default().fg(palette.muted)));
                    }
                    if let Some(icon) = &cell.icon {
                        spans.push(Span::raw(format!("{icon} ")));
                    }
                    spans.push(Span::styled(
                        cell.value.clone(),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::styled(
                        format!(" {}", cell.label),
                        Style::default().fg(palette.muted),
                    ));
                }
                out.push(Line::from(spans));
            }
            DocBlock::Carousel(slides) => {
                if slides.is_empty() {
                    continue;
                }
                let index = carousel.index % slides.len();
                let slide = &slides[index];
                let mode = if carousel.autoplay { "autoplay" } else { "paused" };
                out.push(Line::from(vec![
                    Span::styled(
                        format!("◀ {}/{} ▶", index + 1, slides.len()),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {mode}"), Style::default().fg(palette.muted)),
                ]));
                out.push(Line::from(Span::styled(
                    slide.title.clone(),
                    Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
                )));
                if !slide.caption.is_empty() {
                    out.push(Line::from(Span::styled(slide.caption.clone(), base)));
                }
                for detail in &slide.detail {
                    out.push(Line::from(Span::styled(
                        format!("  {detail}"),
                        Style::default().fg(palette.muted),
                    )));
                }
            }
            DocBlock::Quote {
                text,
                author,
                detail,
            } => {
                out.push(Line::from(Span::styled(
                    format!("  “{text}”"),
                    base.add_modifier(Modifier::ITALIC),
                )));
                out.push(Line::from(Span::styled(
                    format!("     - {author}, {detail}"),
                    Style::default().fg(palette.muted),
                )));
            }
        }
    }
    out
}

fn card_lines(
    out: &mut Vec<Line<'static>>,
    card: &Card,
    link: Option<(usize, &str)>,
    base: Style,
    palette: UiPalette,
) {
    let edge = Style::default().fg(palette.border);
    let mut head = vec![
        Span::styled("┌ ", edge),
        Span::styled(
            format!("{} {}", card.icon, card.title),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(subtitle) = &card.subtitle {
        head.push(Span::styled(format!("  {subtitle}"), Style::default().fg(palette.muted)));
    }
    out.push(Line::from(head));
    for line in &card.body {
        push_with_inline(out, vec![Span::styled("│ ", edge)], line, base, palette);
    }
    if !card.tags.is_empty() {
        out.push(Line::from(vec![
            Span::styled("│ ", edge),
            Span::styled(card.tags.join(" · "), Style::default().fg(palette.warning)),
        ]));
    }
    if let Some((number, name)) = link {
        out.push(Line::from(vec![
            Span::styled("│ ", edge),
            Span::styled(format!("↳ [{number}] open {name}"), Style::default().fg(palette.muted)),
        ]));
    }
    out.push(Line::from(Span::styled("└", edge)));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use nullterm_core::interpreter::interpret;
    use ratatui::backend::TestBackend;

    fn store() -> ContentStore {
        ContentStore::embedded().expect("embedded content")
    }

    fn ready_state() -> ShellState {
        let mut state = ShellState::default();
        state.welcome.stage = WelcomeStage::Done;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn screen(state: &ShellState, store: &ContentStore, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal
            .draw(|f| ui(f, state, store, None, SPINNER[0]))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn lines_text(lines: Vec<Line<'static>>) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn keys_map_to_actions() {
        let store = store();
        let state = ready_state();
        let press = |key: KeyEvent| key_action(key, &state, &store);
        assert_eq!(press(key(KeyCode::Enter)), Some(UserAction::Enter));
        assert_eq!(press(key(KeyCode::Esc)), Some(UserAction::Escape));
        assert_eq!(press(key(KeyCode::Tab)), Some(UserAction::ToggleFocus));
        assert_eq!(press(key(KeyCode::Right)), Some(UserAction::CarouselNext));
        assert_eq!(press(key(KeyCode::PageDown)), Some(UserAction::ScrollDown));
        assert_eq!(press(key(KeyCode::F(1))), Some(UserAction::ToggleHelp));
        assert_eq!(press(key(KeyCode::Char('l'))), Some(UserAction::InsertChar('l')));
        assert_eq!(press(ctrl('k')), Some(UserAction::FocusInput));
        assert_eq!(press(ctrl('b')), Some(UserAction::ToggleMenu));
        assert_eq!(press(ctrl('t')), Some(UserAction::CycleTheme));
        assert_eq!(press(ctrl('x')), None);
    }

    #[test]
    fn question_mark_is_text_once_typing() {
        let store = store();
        let mut state = ready_state();
        let question = key(KeyCode::Char('?'));
        assert_eq!(key_action(question, &state, &store), Some(UserAction::ToggleHelp));
        state.input = "what".to_string();
        assert_eq!(key_action(question, &state, &store), Some(UserAction::InsertChar('?')));
    }

    #[test]
    fn welcome_turns_any_key_into_skip_but_ctrl_c_quits() {
        let store = store();
        let state = ShellState::default();
        assert!(state.welcome.is_active());
        assert_eq!(key_action(key(KeyCode::F(5)), &state, &store), Some(UserAction::SkipWelcome));
        assert_eq!(key_action(ctrl('c'), &state, &store), Some(UserAction::Quit));
    }

    #[test]
    fn sidebar_hides_on_narrow_terminals_unless_menu_open() {
        let mut state = ready_state();
        assert!(panes(Rect::new(0, 0, 120, 40), &state).sidebar.is_some());
        assert!(panes(Rect::new(0, 0, 60, 40), &state).sidebar.is_none());
        state.menu_open = true;
        assert!(panes(Rect::new(0, 0, 60, 40), &state).sidebar.is_some());
    }

    #[test]
    fn clicking_a_sidebar_row_opens_that_file() {
        let store = store();
        let state = ready_state();
        let area = Rect::new(0, 0, 120, 40);
        let sidebar = panes(area, &state).sidebar.expect("sidebar");
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: sidebar.x + 2,
            row: sidebar.y + 1 + 6,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_action(click, area, &state, &store),
            Some(UserAction::OpenFile("team".to_string()))
        );

        let below = MouseEvent {
            row: sidebar.bottom() - 1,
            ..click
        };
        assert_eq!(mouse_action(below, area, &state, &store), None);
    }

    #[test]
    fn carousel_shows_only_current_slide() {
        let store = store();
        let file = store.get("past-photos").expect("photos");
        let doc = render_file(file).expect("document");
        let carousel = CarouselState {
            index: 27,
            autoplay: false,
            ticket: None,
        };
        let text: Vec<String> = lines_text(document_lines(
            &doc,
            &carousel,
            &store,
            palette_for(UiTheme::Matrix),
        ));
        assert!(text.iter().any(|line| line.starts_with("◀ 2/26 ▶") && line.ends_with("paused")));
        assert_eq!(text.iter().filter(|line| line.starts_with('◀')).count(), 1);
    }

    #[test]
    fn dashboard_and_transcript_are_drawn() {
        let store = store();
        let state = ready_state();
        let text = screen(&state, &store, 120, 40);
        assert!(text.contains("NULL EEC Terminal"));
        assert!(text.contains("~/dashboard"));
        assert!(text.contains("README.md"));
    }

    #[test]
    fn welcome_screen_shows_stage_lines() {
        let store = store();
        let mut state = ShellState::default();
        state.welcome.stage = WelcomeStage::Connected;
        state.welcome.revealed = 4;
        let text = screen(&state, &store, 100, 40);
        assert!(text.contains("Initializing NULL EEC"));
        assert!(text.contains("[CON"));
        assert!(!text.contains("[CONNECTED"));
    }

    #[test]
    fn drawing_survives_tiny_terminals() {
        let store = store();
        let mut state = ready_state();
        state.help_open = true;
        state.menu_open = true;
        screen(&state, &store, 10, 5);
    }

    #[test]
    fn every_card_link_opens_its_file() {
        let store = store();
        let readme = store.get("readme").expect("readme");
        let doc = render_file(readme).expect("document");
        let text = lines_text(document_lines(
            &doc,
            &CarouselState::default(),
            &store,
            palette_for(UiTheme::Matrix),
        ));
        let hints: Vec<&str> = text
            .iter()
            .filter_map(|line| line.strip_prefix("│ ↳ "))
            .collect();
        assert_eq!(hints.len(), doc.link_targets().len());
        assert_eq!(hints.len(), 6);

        for (index, (hint, target)) in hints.iter().zip(doc.link_targets()).enumerate() {
            let command = hint
                .strip_prefix(&format!("[{}] ", index + 1))
                .expect("numbered hint");
            let outcome = interpret(command, &store);
            assert_eq!(outcome.selection.as_deref(), Some(target), "{command}");
        }
    }

    #[test]
    fn digits_follow_dashboard_links_when_input_is_empty() {
        let store = store();
        let mut state = ready_state();
        assert_eq!(
            key_action(key(KeyCode::Char('1')), &state, &store),
            Some(UserAction::OpenFile("about-null".to_string()))
        );
        assert_eq!(
            key_action(key(KeyCode::Char('3')), &state, &store),
            Some(UserAction::OpenFile("team".to_string()))
        );
        assert_eq!(
            key_action(key(KeyCode::Char('9')), &state, &store),
            Some(UserAction::InsertChar('9'))
        );

        state.input = "open ".to_string();
        assert_eq!(
            key_action(key(KeyCode::Char('1')), &state, &store),
            Some(UserAction::InsertChar('1'))
        );
    }

    #[test]
    fn sidebar_focus_shows_highlighted_tooltip() {
        let store = store();
        let mut state = ready_state();
        let file = store.at(1).expect("second file");
        assert!(!file.tooltip.is_empty());
        assert!(!screen(&state, &store, 160, 40).contains(&file.tooltip));

        state.focus = Focus::Sidebar;
        state.sidebar_cursor = 1;
        assert!(screen(&state, &store, 160, 40).contains(&file.tooltip));
    }
}
