//! IRIS - Personal Safety Voice Assistant
//!
//! IRIS listens for short spoken commands prefixed with the wake word "iris"
//! and turns them into safety actions: an SOS broadcast to trusted contacts,
//! a time-of-day safety assessment, or showing the current location.
//!
//! ## Pipeline
//!
//! 1. **Capture**: a [`voice::CaptureService`] delivers transcripts to the
//!    [`voice::SessionController`], which owns the one live session.
//! 2. **Interpret**: transcripts are normalized, gated on the wake word and
//!    matched against an ordered phrase table.
//! 3. **Act**: the [`voice::ActionDispatcher`] performs exactly one action and
//!    answers with speech. An SOS suppresses listening until dismissed.

pub mod app;
pub mod clock;
pub mod config;
pub mod domain;
pub mod messaging;
pub mod safety;
pub mod store;
pub mod voice;

pub use domain::*;
