//! # IGNITION UI
//!
//! The parameter panel, modelled without a GUI toolkit.
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐  edit   ┌────────────┐  ParamEvent  ┌───────────────────┐
//! │ GUI slider │───────> │ ParamPanel │────────────> │ dyn ParamListener │
//! └────────────┘         └─────┬──────┘              └─────────┬─────────┘
//!       ^                      │ sync (every frame)            │
//!       └──────────────────────┴──────── AnimationContext <────┘
//! ```
//!
//! Edits never touch animation state directly. They become [`ParamEvent`]s,
//! and whoever owns the state applies them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod binding;
pub mod control;
pub mod event;
pub mod panel;

pub use control::{ControlId, NumericControl};
pub use event::{ParamEvent, ParamListener};
pub use panel::ParamPanel;
