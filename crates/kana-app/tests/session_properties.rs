//! Property-based tests for the diff renderer and the session state machine.
//!
//! Tests verify that invariants hold under arbitrary inputs and event
//! sequences.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use kana_app::{
    AppAction, AppEvent, EditOp, HostMessage, Intent, Page, Session, Snapshot, render_diff,
};
use proptest::prelude::*;

/// Generate a single edit operation.
fn op_strategy() -> impl Strategy<Value = EditOp> {
    let text = "[a-z]{1,3}";
    prop_oneof![
        3 => text.prop_map(EditOp::Same),
        1 => text.prop_map(EditOp::Delete),
        1 => text.prop_map(EditOp::Insert),
        2 => (text, text).prop_map(|(from, to)| EditOp::Change(from, to)),
    ]
}

fn consumes_split(op: &EditOp) -> bool {
    !matches!(op, EditOp::Delete(_))
}

/// Kana token for the n-th consuming operation.
fn kana_token(n: usize) -> String {
    const KANA: [&str; 5] = ["あ", "か", "さ", "た", "きゃ"];
    KANA[n % KANA.len()].to_owned()
}

fn page_strategy() -> impl Strategy<Value = Page> {
    prop_oneof![Just(Page::Start), Just(Page::Training), Just(Page::Summary)]
}

#[derive(Debug, Clone)]
enum Step {
    Update(Page),
    TogglePause,
    Submit,
    Garbage,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => page_strategy().prop_map(Step::Update),
        3 => Just(Step::TogglePause),
        1 => Just(Step::Submit),
        1 => Just(Step::Garbage),
    ]
}

fn update(page: Page) -> AppEvent {
    let raw = HostMessage::Update(Snapshot::new(page)).encode().unwrap_or_default();
    AppEvent::Host(Arc::from(raw))
}

proptest! {
    #[test]
    fn prop_matching_split_is_fully_consumed(diff in prop::collection::vec(op_strategy(), 0..20)) {
        let split: Vec<String> =
            (0..diff.iter().filter(|op| consumes_split(op)).count()).map(kana_token).collect();

        let render = render_diff(&diff, &split);

        prop_assert_eq!(render.mismatch, None);
        prop_assert_eq!(render.kana.text(), split.concat());
    }

    #[test]
    fn prop_renderer_is_total(
        diff in prop::collection::vec(op_strategy(), 0..20),
        split in prop::collection::vec("[あ-ん]{1,2}", 0..20),
    ) {
        let render = render_diff(&diff, &split);

        let consuming = diff.iter().filter(|op| consumes_split(op)).count();
        prop_assert_eq!(render.mismatch.is_some(), consuming != split.len());

        let expected: String = diff
            .iter()
            .map(|op| match op {
                EditOp::Same(t) | EditOp::Delete(t) | EditOp::Insert(t) | EditOp::Change(_, t) => {
                    t.as_str()
                },
            })
            .collect();
        prop_assert_eq!(render.expected.text(), expected);

        let submitted: String = diff
            .iter()
            .filter_map(|op| match op {
                EditOp::Same(t) | EditOp::Insert(t) | EditOp::Change(t, _) => Some(t.as_str()),
                EditOp::Delete(_) => None,
            })
            .collect();
        prop_assert_eq!(render.submitted.text(), submitted);

        let kana: String = split.iter().take(consuming).map(String::as_str).collect();
        prop_assert_eq!(render.kana.text(), kana);
    }

    #[test]
    fn prop_renderer_is_pure(
        diff in prop::collection::vec(op_strategy(), 0..20),
        split in prop::collection::vec("[あ-ん]", 0..20),
    ) {
        prop_assert_eq!(render_diff(&diff, &split), render_diff(&diff, &split));
    }

    #[test]
    fn prop_toggle_pause_off_training_is_noop(
        page in prop_oneof![Just(Page::Start), Just(Page::Summary)],
    ) {
        let t0 = Instant::now();
        let mut session = Session::new(t0);
        session.handle(update(page), t0);
        let before = session.snapshot().cloned();

        let actions = session.toggle_pause(t0 + Duration::from_millis(1));

        prop_assert!(actions.is_empty());
        prop_assert!(!session.is_paused());
        prop_assert_eq!(session.snapshot().cloned(), before);
    }

    #[test]
    fn prop_paused_only_on_training(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let t0 = Instant::now();
        let mut session = Session::new(t0);

        for (i, step) in steps.into_iter().enumerate() {
            let now = t0 + Duration::from_millis(i as u64 * 10);
            let was_paused = session.is_paused();
            match step {
                Step::Update(page) => {
                    session.handle(update(page), now);
                    if page != Page::Training {
                        prop_assert!(!session.is_paused());
                    } else {
                        prop_assert_eq!(session.is_paused(), was_paused);
                    }
                },
                Step::TogglePause => {
                    session.toggle_pause(now);
                },
                Step::Submit => {
                    let actions = session.submit("a".into(), now);
                    prop_assert_eq!(actions.len(), usize::from(session.is_answering()));
                },
                Step::Garbage => {
                    session.handle(AppEvent::Host(Arc::from("{\"Update\":5}")), now);
                    prop_assert_eq!(session.is_paused(), was_paused);
                },
            }

            if session.is_paused() {
                prop_assert_eq!(session.page(), Some(Page::Training));
            }
        }
    }

    #[test]
    fn prop_submit_reports_time_since_last_reset(
        gap_ms in 0u64..60_000,
        second_ms in 0u64..60_000,
    ) {
        let t0 = Instant::now();
        let mut session = Session::new(t0);
        session.handle(update(Page::Training), t0);

        let first_at = t0 + Duration::from_millis(gap_ms);
        let second_at = first_at + Duration::from_millis(second_ms);
        let first = session.submit("a".into(), first_at);
        let second = session.submit("b".into(), second_at);

        let submit = |text: &str, elapsed_ms| {
            vec![AppAction::Send(Intent::Submit { text: text.into(), elapsed_ms })]
        };
        prop_assert_eq!(first, submit("a", gap_ms));
        prop_assert_eq!(second, submit("b", second_ms));
    }
}
