//! Terminal state and the event loop glue around it.

use tokio::task::JoinHandle;

use crate::api::{Build, Log};
use crate::dispatch::{Dispatcher, EventReceiver, TerminalEvent};
use crate::input::{InputLine, Key, KeyOutcome};
use crate::transcript::{Transcript, CLEARED_LINE};

#[derive(Clone, Debug)]
pub enum Action {
    Key(Key),
    Output(TerminalEvent),
}

#[derive(Clone, Debug, Default)]
pub struct TerminalState {
    pub transcript: Transcript,
    pub input: InputLine,
    pub builds: Vec<Build>,
    pub logs: Vec<Log>,
}

impl TerminalState {
    pub fn new(banner: &[String]) -> Self {
        Self {
            transcript: Transcript::with_lines(banner.iter().cloned()),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::Key(key) => self.input.handle_key(key),
            Action::Output(event) => {
                match event {
                    TerminalEvent::Line(line) => self.transcript.push(line),
                    TerminalEvent::Cleared => self.transcript.reset(CLEARED_LINE),
                    TerminalEvent::BuildsLoaded(builds) => self.builds = builds,
                    TerminalEvent::LogsLoaded(logs) => self.logs = logs,
                }
                KeyOutcome::Ignored
            }
        }
    }
}

/// Owns the state and runs submitted lines as independent tasks; output is
/// applied in completion order.
pub struct Console {
    state: TerminalState,
    dispatcher: Dispatcher,
    events: EventReceiver,
    in_flight: Vec<JoinHandle<()>>,
}

impl Console {
    pub fn new(state: TerminalState, dispatcher: Dispatcher, events: EventReceiver) -> Self {
        Self {
            state,
            dispatcher,
            events,
            in_flight: Vec::new(),
        }
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    pub fn start(&mut self) {
        let dispatcher = self.dispatcher.clone();
        self.in_flight
            .push(tokio::spawn(async move { dispatcher.initialize().await }));
    }

    /// Feed a key. A submitted line is dispatched without blocking input.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        let outcome = self.state.apply(Action::Key(key));
        if let KeyOutcome::Submit(line) = &outcome {
            let dispatcher = self.dispatcher.clone();
            let line = line.clone();
            self.in_flight
                .push(tokio::spawn(async move { dispatcher.submit(&line).await }));
        }
        self.in_flight.retain(|task| !task.is_finished());
        outcome
    }

    /// Apply whatever output has arrived so far.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.state.apply(Action::Output(event));
        }
    }

    /// Wait for every in-flight command, then apply their output.
    pub async fn settle(&mut self) {
        for task in self.in_flight.drain(..) {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "command task ended abnormally");
            }
        }
        self.pump();
    }
}
