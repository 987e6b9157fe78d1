//! Terminal presentation layer.
//!
//! Implements the orchestrator's [`Presenter`](crate::orchestrator::Presenter)
//! contract on top of `console` and `indicatif`.

pub mod icons;

mod console_presenter;

pub use console_presenter::ConsolePresenter;
