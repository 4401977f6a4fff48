//! Integration tests for the runtime loop.
//!
//! A scripted in-memory driver stands in for the terminal and the host. Each
//! test runs the loop to completion, then checks what was sent and how the
//! view was driven.

#![allow(clippy::unwrap_used)]

use std::{
    collections::VecDeque,
    convert::Infallible,
    time::{Duration, Instant},
};

use kana_app::{
    Driver, DriverEvent, FocusTarget, HostMessage, InputState, Intent, KeyInput, Page, Runtime,
    Session, Snapshot,
};

/// One scripted input.
enum Step {
    Key(KeyInput),
    Host(String),
    Advance(u64),
    Tick,
}

struct ScriptedDriver {
    script: VecDeque<Step>,
    clock: Instant,
    sent: Vec<String>,
    renders: usize,
    focus: Vec<FocusTarget>,
    reloads: usize,
    stopped: bool,
}

impl ScriptedDriver {
    fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: script.into_iter().collect(),
            clock: Instant::now(),
            sent: Vec::new(),
            renders: 0,
            focus: Vec::new(),
            reloads: 0,
            stopped: false,
        }
    }

    fn intents(&self) -> Vec<Intent> {
        self.sent.iter().map(|line| Intent::decode(line).unwrap()).collect()
    }
}

impl Driver for ScriptedDriver {
    type Error = Infallible;
    type Instant = Instant;

    async fn poll_event(
        &mut self,
        session: &mut Session<Instant>,
        input: &mut InputState,
    ) -> Result<DriverEvent, Infallible> {
        let now = self.clock;
        Ok(match self.script.pop_front() {
            Some(Step::Key(key)) => DriverEvent::Actions(input.handle_key(key, session, now)),
            Some(Step::Host(line)) => DriverEvent::HostLine(line),
            Some(Step::Advance(ms)) => {
                self.clock += Duration::from_millis(ms);
                DriverEvent::Actions(vec![])
            },
            Some(Step::Tick) => DriverEvent::Actions(session.handle(kana_app::AppEvent::Tick, now)),
            None => DriverEvent::HostClosed,
        })
    }

    async fn send_line(&mut self, line: String) -> Result<(), Infallible> {
        self.sent.push(line);
        Ok(())
    }

    fn now(&self) -> Instant {
        self.clock
    }

    fn render(
        &mut self,
        _session: &Session<Instant>,
        _input: &InputState,
    ) -> Result<(), Infallible> {
        self.renders += 1;
        Ok(())
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focus.push(target);
    }

    fn reload(&mut self) -> Result<(), Infallible> {
        self.reloads += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

fn update(page: Page, set: &str) -> Step {
    let mut snapshot = Snapshot::new(page);
    snapshot.set = set.to_owned();
    snapshot.word = "ねこ".to_owned();
    Step::Host(HostMessage::Update(snapshot).encode().unwrap())
}

fn typed(text: &str) -> impl Iterator<Item = Step> + '_ {
    text.chars().map(|c| Step::Key(KeyInput::Char(c)))
}

async fn run(script: impl IntoIterator<Item = Step>) -> Runtime<ScriptedDriver> {
    let mut runtime = Runtime::new(ScriptedDriver::new(script));
    runtime.run().await.unwrap();
    runtime
}

#[tokio::test]
async fn init_is_sent_before_anything_else() {
    let runtime = run([]).await;

    assert_eq!(runtime.driver().intents(), vec![Intent::Init]);
    assert!(runtime.driver().renders >= 1);
    assert!(runtime.driver().stopped);
    assert_eq!(runtime.session().page(), None);
}

#[tokio::test]
async fn full_drill_round_trip() {
    let mut script = vec![update(Page::Start, "Hiragana"), Step::Key(KeyInput::Enter)];
    script.push(update(Page::Training, "Hiragana"));
    script.push(Step::Advance(1500));
    script.extend(typed("neko"));
    script.push(Step::Key(KeyInput::Enter));
    script.push(update(Page::Summary, "Hiragana"));
    script.push(Step::Key(KeyInput::Enter));

    let runtime = run(script).await;

    assert_eq!(runtime.driver().intents(), vec![
        Intent::Init,
        Intent::Start { set: "Hiragana".into(), size: 100 },
        Intent::Submit { text: "neko".into(), elapsed_ms: 1500 },
        Intent::Restart,
    ]);
    assert_eq!(runtime.session().page(), Some(Page::Summary));
    assert_eq!(runtime.driver().focus, vec![FocusTarget::Answer]);
}

#[tokio::test]
async fn malformed_lines_are_ignored() {
    let script = vec![
        Step::Host("garbage".into()),
        Step::Host(r#"{"Nope":null}"#.into()),
        update(Page::Training, ""),
        Step::Host(r#"{"Update":{"page":"Elsewhere"}}"#.into()),
    ];

    let runtime = run(script).await;

    assert_eq!(runtime.session().page(), Some(Page::Training));
    assert_eq!(runtime.driver().intents(), vec![Intent::Init]);
}

#[tokio::test]
async fn resuming_discards_text_typed_while_paused() {
    let mut script = vec![update(Page::Training, "")];
    script.extend(typed("ne"));
    script.push(Step::Key(KeyInput::F(2)));
    script.extend(typed("xx"));
    script.push(Step::Key(KeyInput::F(2)));
    script.extend(typed("ko"));

    let runtime = run(script).await;

    assert_eq!(runtime.input().buffer(), "ko");
    assert_eq!(runtime.input().focus(), FocusTarget::Answer);
    assert_eq!(runtime.driver().focus, vec![
        FocusTarget::Answer,
        FocusTarget::Main,
        FocusTarget::Answer
    ]);
    assert!(!runtime.session().is_paused());
}

#[tokio::test]
async fn host_refresh_reloads_view() {
    let mut script = vec![update(Page::Training, "")];
    script.extend(typed("ne"));
    script.push(Step::Host(r#"{"Refresh":null}"#.into()));

    let runtime = run(script).await;

    assert_eq!(runtime.driver().reloads, 1);
    assert_eq!(runtime.input().buffer(), "");
    assert_eq!(runtime.session().page(), Some(Page::Training));
}

#[tokio::test]
async fn f5_asks_host_to_refresh() {
    let runtime = run([Step::Key(KeyInput::F(5)), Step::Tick]).await;

    assert_eq!(runtime.driver().intents(), vec![Intent::Init, Intent::Refresh]);
}

#[tokio::test]
async fn escape_quits_before_host_closes() {
    let script = vec![
        update(Page::Start, "Katakana"),
        Step::Key(KeyInput::Esc),
        Step::Key(KeyInput::Enter),
    ];

    let mut runtime = Runtime::new(ScriptedDriver::new(script));
    runtime.run().await.unwrap();

    assert_eq!(runtime.driver().intents(), vec![Intent::Init]);
    assert_eq!(runtime.driver().script.len(), 1);
}
