//! Session state machine.
//!
//! [`Session`] tracks the host's latest [`Snapshot`], the local pause flag and
//! the answer timer. It is a pure state machine: it consumes
//! [`AppEvent`]s and user operations and produces [`AppAction`]s for the
//! runtime to execute. It never talks to the host directly; outbound
//! intents leave as [`AppAction::Send`].
//!
//! # Invariants
//!
//! - A snapshot replaces the previous one wholesale.
//! - `paused` is only ever `true` while the page is [`Page::Training`].
//! - The answer timer restarts on every page change, outbound `Start`,
//!   outbound `Submit` and every `toggle_pause`.

use std::{ops::Sub, time::Duration};

use tracing::{debug, warn};

use crate::{
    AnswerTimer, AppAction, AppEvent, DiffRender, FocusTarget, HostMessage, Intent, Page,
    Snapshot,
};

/// Session state machine.
///
/// Generic over the instant type; every time-dependent operation takes `now`
/// from the driver.
#[derive(Debug, Clone)]
pub struct Session<I> {
    /// Latest host snapshot. `None` until the first `Update`.
    snapshot: Option<Snapshot>,
    /// Local pause flag.
    paused: bool,
    /// Time spent on the current answer.
    timer: AnswerTimer<I>,
    /// Rendered diff of the snapshot's submitted result.
    diff_view: Option<DiffRender>,
}

impl<I> Session<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a session with no snapshot yet.
    pub fn new(now: I) -> Self {
        Self {
            snapshot: None,
            paused: false,
            timer: AnswerTimer::new(now),
            diff_view: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => {
                if self.is_answering() {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Resize => vec![AppAction::Render],
            AppEvent::Host(raw) => match HostMessage::decode(&raw) {
                Ok(HostMessage::Update(snapshot)) => self.apply_snapshot(snapshot, now),
                Ok(HostMessage::Refresh) => {
                    debug!("host requested a view reload");
                    vec![AppAction::Reload]
                },
                Err(error) => {
                    warn!(%error, "ignoring host message");
                    vec![]
                },
            },
            AppEvent::HostClosed => {
                warn!("host closed its output");
                vec![AppAction::Quit]
            },
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot, now: I) -> Vec<AppAction> {
        if self.page() != Some(snapshot.page) {
            self.timer.reset(now);
        }
        if snapshot.page != Page::Training {
            self.paused = false;
        }

        self.diff_view = snapshot.submitted.as_ref().map(|result| {
            let render = result.render();
            if let Some(mismatch) = render.mismatch {
                warn!(%mismatch, word = %snapshot.word, "answer diff does not match word split");
            }
            render
        });
        self.snapshot = Some(snapshot);

        let mut actions = vec![AppAction::Render];
        if self.is_answering() {
            actions.push(AppAction::Focus(FocusTarget::Answer));
        }
        actions
    }

    /// Pause or resume the drill.
    ///
    /// The timer restarts whatever the page. Off the training page nothing
    /// else changes. Resuming discards anything typed while paused.
    pub fn toggle_pause(&mut self, now: I) -> Vec<AppAction> {
        self.timer.reset(now);
        if self.page() != Some(Page::Training) {
            debug!(page = ?self.page(), "pause ignored outside training");
            return vec![];
        }

        self.paused = !self.paused;
        if self.paused {
            vec![AppAction::Focus(FocusTarget::Main), AppAction::Render]
        } else {
            vec![AppAction::ClearInput, AppAction::Focus(FocusTarget::Answer), AppAction::Render]
        }
    }

    /// Ask the host to start a drill. Only valid on the start page.
    ///
    /// The page does not change until the host answers with a snapshot.
    pub fn start(&mut self, set: &str, size: u32, now: I) -> Vec<AppAction> {
        if self.page() != Some(Page::Start) {
            debug!(page = ?self.page(), "start ignored outside the start page");
            return vec![];
        }

        self.timer.reset(now);
        vec![AppAction::Send(Intent::Start { set: set.to_owned(), size })]
    }

    /// Submit an answer. Only valid while training and not paused.
    ///
    /// The elapsed time is read and the timer restarted before the intent
    /// leaves, so the next answer is timed from now.
    pub fn submit(&mut self, text: String, now: I) -> Vec<AppAction> {
        if !self.is_answering() {
            debug!(page = ?self.page(), paused = self.paused, "submit ignored");
            return vec![];
        }

        let elapsed_ms = self.timer.lap(now);
        vec![AppAction::Send(Intent::Submit { text, elapsed_ms })]
    }

    /// Return to the start page. Valid from anywhere.
    pub fn restart(&mut self) -> Vec<AppAction> {
        vec![AppAction::Send(Intent::Restart)]
    }

    /// Announce the UI to the host.
    pub fn init(&mut self) -> Vec<AppAction> {
        vec![AppAction::Send(Intent::Init)]
    }

    /// Ask the host to reload UI resources.
    pub fn refresh(&mut self) -> Vec<AppAction> {
        vec![AppAction::Send(Intent::Refresh)]
    }

    /// Quit the application.
    pub fn quit(&mut self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Latest host snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Current page, `None` before the first snapshot.
    pub fn page(&self) -> Option<Page> {
        self.snapshot.as_ref().map(|snapshot| snapshot.page)
    }

    /// Whether the drill is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the user can type and submit an answer.
    pub fn is_answering(&self) -> bool {
        self.page() == Some(Page::Training) && !self.paused
    }

    /// Rendered diff of the last graded answer.
    pub fn diff_view(&self) -> Option<&DiffRender> {
        self.diff_view.as_ref()
    }

    /// The answer timer.
    pub fn timer(&self) -> &AnswerTimer<I> {
        &self.timer
    }

    /// Time spent on the current answer.
    pub fn answer_elapsed(&self, now: I) -> Duration {
        self.timer.elapsed(now)
    }

    /// Progress text of the training card, e.g. `3/10 (2 misses)`.
    pub fn status_line(&self) -> Option<String> {
        let snapshot = self.snapshot.as_ref()?;
        let total = snapshot.hits.saturating_add(snapshot.remaining);
        let mut line = format!("{}/{total}", snapshot.hits);
        match snapshot.misses {
            0 => {},
            1 => line.push_str(" (1 miss)"),
            n => line.push_str(&format!(" ({n} misses)")),
        }
        Some(line)
    }
}
