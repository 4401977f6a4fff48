//! Fuzz target for the session state machine
//!
//! Drives a session with arbitrary operations and host messages under
//! virtual time.
//!
//! # Invariants
//!
//! - The session NEVER panics
//! - `paused` implies the page is Training
//! - Submits are only emitted while answering

#![no_main]

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use arbitrary::Arbitrary;
use kana_app::{AppAction, AppEvent, HostMessage, Intent, Page, Session, Snapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Advance(u16),
    Update(u8),
    Raw(String),
    TogglePause,
    Start(String, u32),
    Submit(String),
    Restart,
    Tick,
}

fuzz_target!(|steps: Vec<Step>| {
    let mut now = Instant::now();
    let mut session = Session::new(now);

    for step in steps {
        let answering = session.is_answering();
        let actions = match step {
            Step::Advance(ms) => {
                now += Duration::from_millis(u64::from(ms));
                vec![]
            }
            Step::Update(page) => {
                let page = [Page::Start, Page::Training, Page::Summary][(page % 3) as usize];
                let raw = HostMessage::Update(Snapshot::new(page)).encode().unwrap_or_default();
                session.handle(AppEvent::Host(Arc::from(raw)), now)
            }
            Step::Raw(raw) => session.handle(AppEvent::Host(Arc::from(raw)), now),
            Step::TogglePause => session.toggle_pause(now),
            Step::Start(set, size) => session.start(&set, size, now),
            Step::Submit(text) => session.submit(text, now),
            Step::Restart => session.restart(),
            Step::Tick => session.handle(AppEvent::Tick, now),
        };

        if session.is_paused() {
            assert_eq!(session.page(), Some(Page::Training));
        }
        let submitted =
            actions.iter().any(|a| matches!(a, AppAction::Send(Intent::Submit { .. })));
        assert!(!submitted || answering);
    }
});
