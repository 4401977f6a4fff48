//! Generic runtime for session orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`Session`]: drill state machine
//! - [`Bridge`]: message queue to and from the host
//! - [`Driver`]: Platform-specific I/O

use tracing::{debug, info};

use crate::{
    AppAction, AppEvent, Bridge, Driver, DriverEvent, InputState, Session, Subscription,
};

/// Generic runtime that orchestrates Session, Bridge, and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    session: Session<D::Instant>,
    input: InputState,
    bridge: Bridge,
    inbound: Subscription,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime around `driver`.
    pub fn new(driver: D) -> Self {
        let session = Session::new(driver.now());
        let mut bridge = Bridge::new();
        let inbound = bridge.subscribe();
        Self { driver, session, input: InputState::new(), bridge, inbound }
    }

    /// Run the main event loop until the user quits or the host closes.
    ///
    /// Renders the placeholder, sends `Init`, then loops:
    /// 1. Polls the driver
    /// 2. Executes resulting actions and flushes outbound intents
    /// 3. Feeds delivered host messages into the session
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.session, &self.input)?;

        let actions = self.session.init();
        let mut should_quit = self.process_actions(actions).await?;
        info!("session started");

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        info!("session ended");
        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        match self.driver.poll_event(&mut self.session, &mut self.input).await? {
            DriverEvent::Actions(actions) => {
                if self.process_actions(actions).await? {
                    return Ok(true);
                }
            },
            DriverEvent::HostLine(line) => {
                debug!(len = line.len(), "host line");
                self.bridge.deliver(line);
            },
            DriverEvent::HostClosed => {
                let now = self.driver.now();
                let actions = self.session.handle(AppEvent::HostClosed, now);
                if self.process_actions(actions).await? {
                    return Ok(true);
                }
            },
        }

        self.drain_inbound().await
    }

    /// Feed every delivered host message into the session, in order.
    async fn drain_inbound(&mut self) -> Result<bool, D::Error> {
        while let Some(raw) = self.inbound.try_recv() {
            let now = self.driver.now();
            let actions = self.session.handle(AppEvent::Host(raw), now);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute session actions, then flush outbound intents.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut should_quit = false;

        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.session, &self.input)?,
                AppAction::Quit => {
                    should_quit = true;
                    break;
                },
                AppAction::Send(intent) => self.bridge.send(intent),
                AppAction::Focus(target) => {
                    self.input.set_focus(target);
                    self.driver.focus(target);
                },
                AppAction::ClearInput => self.input.clear(),
                AppAction::Reload => {
                    self.input.reset();
                    self.driver.reload()?;
                    self.driver.render(&self.session, &self.input)?;
                },
            }
        }

        self.send_outgoing().await?;
        Ok(should_quit)
    }

    /// Write all queued intents to the host.
    async fn send_outgoing(&mut self) -> Result<(), D::Error> {
        for line in self.bridge.take_outgoing() {
            debug!(%line, "intent");
            self.driver.send_line(line).await?;
        }
        Ok(())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session<D::Instant> {
        &self.session
    }

    /// Get a reference to the input state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
