use super::*;
use pretty_assertions::assert_eq;

#[test]
fn initial_transcript_is_the_seed_lines() {
    let store = store();
    let state = state(&store);
    assert_eq!(lines(&state), SEED_LINES.to_vec());
    assert_eq!(state.selected, None);
}

#[test]
fn help_appends_usage_block_after_echo() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "help");

    let all = lines(&state);
    let added = &all[SEED_LINES.len()..];
    assert_eq!(added[0], "> help");
    assert_eq!(added[1], "Available commands:");
    assert_eq!(added.len(), 1 + 7);
    assert_eq!(
        added.last().map(String::as_str),
        Some("💡 Tip: You can also click on files in the left panel!")
    );
}

#[test]
fn open_contact_selects_and_confirms() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "open contact.txt");

    assert_eq!(state.selected.as_deref(), Some("contact"));
    assert_eq!(
        &lines(&state)[SEED_LINES.len()..],
        &["> open contact.txt".to_string(), "✓ Opened: contact.txt".to_string()]
    );
    assert_eq!(state.sidebar_cursor, store.position("contact").unwrap_or_default());
}

#[test]
fn open_missing_file_keeps_selection() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "open team.json");
    execute(&mut state, &store, "open nope.md");

    assert_eq!(state.selected.as_deref(), Some("team"));
    let all = lines(&state);
    let tail = &all[all.len() - 3..];
    assert_eq!(
        tail,
        &[
            "❌ Error: File \"nope.md\" not found".to_string(),
            "😅 Not a valid file! Try clicking on a file on the left.".to_string(),
            "💡 Hint: Type \"ls\" to see all available files".to_string(),
        ]
    );
}

#[test]
fn empty_input_is_a_no_op() {
    let store = store();
    let mut state = state(&store);
    let effects = submit(&mut state, &store, "   ");

    assert_eq!(lines(&state), SEED_LINES.to_vec());
    assert!(!state.is_loading());
    assert_eq!(effects, vec![ShellEffect::RequestFrame]);
    assert!(state.input.is_empty());
}

#[test]
fn unknown_command_reports_and_hints() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "foobar");

    assert_eq!(
        &lines(&state)[SEED_LINES.len()..],
        &[
            "> foobar".to_string(),
            "❌ Command not found: foobar".to_string(),
            "😅 Not a valid command! Try clicking on a file on the left.".to_string(),
            "💡 Type \"help\" to see available commands".to_string(),
        ]
    );
}

#[test]
fn clear_empties_everything_including_the_echo() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "ls");
    execute(&mut state, &store, "clear");
    assert!(state.transcript.is_empty());
}

#[test]
fn ls_is_stable_across_calls() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "ls");
    let first = lines(&state);
    state.transcript.clear();
    execute(&mut state, &store, "ls");
    let second = lines(&state);

    assert_eq!(&first[SEED_LINES.len()..], second.as_slice());
    assert_eq!(second.len(), 1 + store.len());
}

#[test]
fn sidebar_open_appends_ui_line_and_closes_menu() {
    let store = store();
    let mut state = state(&store);
    state.menu_open = true;
    run_user(&mut state, &store, UserAction::OpenFile("about-null".to_string()));

    assert_eq!(state.selected.as_deref(), Some("about-null"));
    assert!(!state.menu_open);
    assert_eq!(
        lines(&state).last().map(String::as_str),
        Some("> Opened file: about-null-eec.md")
    );
}

#[test]
fn sidebar_enter_opens_highlighted_file() {
    let store = store();
    let mut state = state(&store);
    run_user(&mut state, &store, UserAction::CursorDown);
    run_user(&mut state, &store, UserAction::CursorDown);
    assert_eq!(state.focus, Focus::Sidebar);
    run_user(&mut state, &store, UserAction::Enter);

    assert_eq!(state.selected.as_deref(), Some("about-eec"));
}

#[test]
fn cursor_wraps_both_ways() {
    let store = store();
    let mut state = state(&store);
    run_user(&mut state, &store, UserAction::CursorUp);
    assert_eq!(state.sidebar_cursor, store.len() - 1);
    run_user(&mut state, &store, UserAction::CursorDown);
    assert_eq!(state.sidebar_cursor, 0);
}

#[test]
fn unknown_sidebar_id_changes_nothing() {
    let store = store();
    let mut state = state(&store);
    run_user(&mut state, &store, UserAction::OpenFile("ghost".to_string()));
    assert_eq!(state.selected, None);
    assert_eq!(lines(&state), SEED_LINES.to_vec());
}

#[test]
fn escape_closes_overlays_before_clearing_input() {
    let store = store();
    let mut state = state(&store);
    state.help_open = true;
    state.menu_open = true;
    state.input = "ls".to_string();

    run_user(&mut state, &store, UserAction::Escape);
    assert!(!state.help_open);
    assert!(state.menu_open);
    run_user(&mut state, &store, UserAction::Escape);
    assert!(!state.menu_open);
    assert_eq!(state.input, "ls");
    run_user(&mut state, &store, UserAction::Escape);
    assert!(state.input.is_empty());
}

#[test]
fn typing_moves_focus_to_input() {
    let store = store();
    let mut state = state(&store);
    state.focus = Focus::Sidebar;
    run_user(&mut state, &store, UserAction::InsertChar('l'));
    run_user(&mut state, &store, UserAction::InsertChar('s'));
    run_user(&mut state, &store, UserAction::InsertChar('x'));
    run_user(&mut state, &store, UserAction::Backspace);

    assert_eq!(state.focus, Focus::Input);
    assert_eq!(state.input, "ls");
}

#[test]
fn show_dashboard_clears_selection() {
    let store = store();
    let mut state = state(&store);
    execute(&mut state, &store, "open past-photos/");
    let carousel = state.carousel.ticket;
    let effects = run_user(&mut state, &store, UserAction::ShowDashboard);

    assert_eq!(state.selected, None);
    assert_eq!(cancelled(&effects), carousel.into_iter().collect::<Vec<_>>());
}
