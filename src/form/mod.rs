pub mod fsm;
mod state;
pub mod view;

pub use fsm::{FormEvent, FormState, FormStateMachine};
pub use state::{ERROR_MESSAGE, FormSnapshot, PendingSubmit, QueryForm};
