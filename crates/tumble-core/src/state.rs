//! Main loop state machine

/// Window events the loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// The user asked to close the window
    Quit,
    /// Anything else (ignored)
    Other,
}

/// Running until the first quit event, then stopped for good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

impl LoopState {
    /// Consume a whole batch of polled events and return the next state.
    ///
    /// The batch is always drained to the end; a quit anywhere in it stops
    /// the loop. `Stopped` is terminal.
    pub fn after_events<I>(self, events: I) -> LoopState
    where
        I: IntoIterator<Item = LoopEvent>,
    {
        let mut quit = false;
        for event in events {
            if event == LoopEvent::Quit {
                quit = true;
            }
        }

        match self {
            LoopState::Stopped => LoopState::Stopped,
            LoopState::Running if quit => {
                log::info!("Quit requested");
                LoopState::Stopped
            }
            LoopState::Running => LoopState::Running,
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}
