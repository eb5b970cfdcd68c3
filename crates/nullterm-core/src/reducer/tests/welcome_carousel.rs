use super::*;
use pretty_assertions::assert_eq;

use crate::state::CONNECTED_BANNER;

fn fresh() -> ShellState {
    ShellState::default()
}

#[test]
fn boot_schedules_first_welcome_step() {
    let store = store();
    let mut state = fresh();
    let effects = run_runtime(&mut state, &store, RuntimeAction::Boot { skip_welcome: false });

    assert_eq!(state.welcome.stage, WelcomeStage::Initializing);
    assert!(matches!(
        effects.as_slice(),
        [
            ShellEffect::Schedule {
                timer: Timer::WelcomeStep,
                after_ms: 1_000,
                ..
            },
            ShellEffect::RequestFrame
        ]
    ));
}

#[test]
fn welcome_walks_every_stage_with_typewriter() {
    let store = store();
    let mut state = fresh();
    let effects = run_runtime(&mut state, &store, RuntimeAction::Boot { skip_welcome: false });
    let step = scheduled(&effects, Timer::WelcomeStep).expect("step");

    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    assert_eq!(state.welcome.stage, WelcomeStage::Connected);
    let mut typewriter = scheduled(&effects, Timer::Typewriter).expect("typewriter");
    let step = scheduled(&effects, Timer::WelcomeStep).expect("next step");

    for _ in 0..4 {
        let effects = fire(&mut state, &store, typewriter, Timer::Typewriter);
        typewriter = scheduled(&effects, Timer::Typewriter).expect("more chars");
    }
    assert_eq!(state.welcome.banner(), "[CON");

    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    assert_eq!(state.welcome.stage, WelcomeStage::Greeting);
    assert_eq!(state.welcome.banner(), CONNECTED_BANNER);
    assert_eq!(cancelled(&effects), vec![typewriter]);
    let step = scheduled(&effects, Timer::WelcomeStep).expect("hint step");

    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    assert_eq!(state.welcome.stage, WelcomeStage::Hint);
    assert!(effects.contains(&ShellEffect::Schedule {
        ticket: scheduled(&effects, Timer::WelcomeStep).expect("final step"),
        timer: Timer::WelcomeStep,
        after_ms: 1_500,
    }));
    let step = scheduled(&effects, Timer::WelcomeStep).expect("final step");

    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    assert_eq!(state.welcome.stage, WelcomeStage::Done);
    assert_eq!(scheduled(&effects, Timer::WelcomeStep), None);
    assert!(state.live_tickets().is_empty());
}

#[test]
fn typewriter_stops_after_last_char() {
    let store = store();
    let mut state = fresh();
    let effects = run_runtime(&mut state, &store, RuntimeAction::Boot { skip_welcome: false });
    let step = scheduled(&effects, Timer::WelcomeStep).expect("step");
    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    let mut next = scheduled(&effects, Timer::Typewriter);

    let mut fired = 0;
    while let Some(ticket) = next {
        let effects = fire(&mut state, &store, ticket, Timer::Typewriter);
        next = scheduled(&effects, Timer::Typewriter);
        fired += 1;
    }
    assert_eq!(fired, CONNECTED_BANNER.chars().count());
    assert_eq!(state.welcome.banner(), CONNECTED_BANNER);
    assert_eq!(state.welcome.typewriter, None);
}

#[test]
fn any_key_skips_welcome_and_is_swallowed() {
    let store = store();
    let mut state = fresh();
    let effects = run_runtime(&mut state, &store, RuntimeAction::Boot { skip_welcome: false });
    let step = scheduled(&effects, Timer::WelcomeStep).expect("step");

    let effects = run_user(&mut state, &store, UserAction::InsertChar('x'));

    assert_eq!(state.welcome.stage, WelcomeStage::Done);
    assert!(state.input.is_empty());
    assert_eq!(cancelled(&effects), vec![step]);

    let effects = fire(&mut state, &store, step, Timer::WelcomeStep);
    assert!(effects.is_empty());
}

#[test]
fn quit_during_welcome_cancels_its_timers() {
    let store = store();
    let mut state = fresh();
    let effects = run_runtime(&mut state, &store, RuntimeAction::Boot { skip_welcome: false });
    let step = scheduled(&effects, Timer::WelcomeStep).expect("step");

    let effects = run_user(&mut state, &store, UserAction::Quit);
    assert_eq!(effects, vec![ShellEffect::Cancel { ticket: step }, ShellEffect::Quit]);
}

#[test]
fn gallery_autoplay_advances_and_wraps() {
    let store = store();
    let mut state = state(&store);
    let effects = run_user(&mut state, &store, UserAction::OpenFile("past-photos".to_string()));
    assert!(state.carousel.autoplay);
    let mut ticket = scheduled(&effects, Timer::CarouselAdvance).expect("autoplay");

    let slides = 26;
    for expected in 1..=slides {
        let effects = fire(&mut state, &store, ticket, Timer::CarouselAdvance);
        assert_eq!(state.carousel.index, expected % slides);
        ticket = scheduled(&effects, Timer::CarouselAdvance).expect("reschedule");
    }
}

#[test]
fn manual_navigation_disables_autoplay() {
    let store = store();
    let mut state = state(&store);
    let effects = run_user(&mut state, &store, UserAction::OpenFile("past-events".to_string()));
    let ticket = scheduled(&effects, Timer::CarouselAdvance).expect("autoplay");

    let effects = run_user(&mut state, &store, UserAction::CarouselPrev);
    assert_eq!(cancelled(&effects), vec![ticket]);
    assert!(!state.carousel.autoplay);
    assert_eq!(state.carousel.index, 5);

    run_user(&mut state, &store, UserAction::CarouselNext);
    assert_eq!(state.carousel.index, 0);

    let effects = fire(&mut state, &store, ticket, Timer::CarouselAdvance);
    assert!(effects.is_empty());
    assert_eq!(state.carousel.index, 0);
}

#[test]
fn selecting_another_file_resets_the_carousel() {
    let store = store();
    let mut state = state(&store);
    run_user(&mut state, &store, UserAction::OpenFile("past-photos".to_string()));
    run_user(&mut state, &store, UserAction::CarouselNext);
    run_user(&mut state, &store, UserAction::CarouselNext);
    assert_eq!(state.carousel.index, 2);

    let effects = run_user(&mut state, &store, UserAction::OpenFile("team".to_string()));
    assert_eq!(state.carousel.index, 0);
    assert!(!state.carousel.autoplay);
    assert_eq!(scheduled(&effects, Timer::CarouselAdvance), None);

    run_user(&mut state, &store, UserAction::CarouselNext);
    assert_eq!(state.carousel.index, 0);
}

#[test]
fn reopening_the_same_file_restarts_autoplay() {
    let store = store();
    let mut state = state(&store);
    let first = run_user(&mut state, &store, UserAction::OpenFile("past-photos".to_string()));
    let first = scheduled(&first, Timer::CarouselAdvance).expect("autoplay");
    run_user(&mut state, &store, UserAction::CarouselNext);

    let effects = run_user(&mut state, &store, UserAction::OpenFile("past-photos".to_string()));
    assert_ne!(scheduled(&effects, Timer::CarouselAdvance), Some(first));
    assert!(state.carousel.autoplay);
    assert_eq!(state.carousel.index, 0);
}
