//! Presentation only: widgets read the application state and report user
//! input as [`UiEvent`](crate::state::UiEvent)s. Nothing here mutates state.

pub mod cards;
pub mod panels;
pub mod plot;
pub mod table;
