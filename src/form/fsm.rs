use tracing::{debug, info};

// Form states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Loading,
}

// Form events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Settled,
}

/// Two-state machine behind the loading flag.
///
/// Every event is accepted in every state: a submit while loading starts an
/// overlapping request, and a settle while idle is the later of two
/// overlapping requests finishing.
#[derive(Debug, Default)]
pub struct FormStateMachine {
    state: FormState,
}

impl FormStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> FormState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FormState::Loading
    }

    pub fn transition(&mut self, event: FormEvent) -> FormState {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (_, FormEvent::Submit) => FormState::Loading,
            (_, FormEvent::Settled) => FormState::Idle,
        };

        if old_state != new_state {
            info!(
                "Form state transition: {:?} -> {:?} (event: {:?})",
                old_state, new_state, event
            );
        } else {
            debug!("Form staying in state {:?} after event {:?}", old_state, event);
        }

        self.state = new_state;
        new_state
    }
}
