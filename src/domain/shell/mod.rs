pub mod handler;
pub mod page;
pub mod state;

pub use state::{Controls, Exchange, ShellAction, Transition, UiState};
