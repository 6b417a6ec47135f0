//! # IGNITION Event System
//!
//! Everything that happens outside the frame loop reaches it as a
//! [`SceneEvent`] on a bounded channel.
//!
//! ```text
//! ┌──────────────┐
//! │ Param panel  │──┐
//! └──────────────┘  │     ┌─────────────┐      ┌─────────────┐
//! ┌──────────────┐  ├────>│   Event     │─────>│ Frame loop  │
//! │ Model loader │──┤     │   Channel   │      │ (drains at  │
//! └──────────────┘  │     └─────────────┘      │ frame start)│
//! ┌──────────────┐  │                          └─────────────┘
//! │ Window       │──┘
//! └──────────────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use ignition_ui::{ParamEvent, ParamListener};
use tracing::warn;

use crate::scene::{LoadedModel, MeshId};

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// Events consumed by the frame loop.
#[derive(Clone, Debug)]
pub enum SceneEvent<M = MeshId> {
    /// A panel edit.
    Param(ParamEvent),

    /// The rocket model finished loading.
    ModelLoaded(LoadedModel<M>),

    /// The rocket model could not be loaded.
    ModelFailed {
        /// What went wrong.
        reason: String,
    },

    /// The drawing surface changed size.
    Resized {
        /// New width in CSS pixels.
        width: u32,
        /// New height in CSS pixels.
        height: u32,
        /// Device pixel ratio reported by the host.
        device_pixel_ratio: f32,
    },
}

/// Event bus carrying [`SceneEvent`]s into the frame loop.
///
/// Bounded so a stalled loop cannot grow memory without limit.
pub struct EventBus<M = MeshId> {
    sender: Sender<SceneEvent<M>>,
    receiver: Receiver<SceneEvent<M>>,
}

impl<M> EventBus<M> {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender<M> {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver<M> {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender and receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender<M>, EventReceiver<M>) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl<M> Default for EventBus<M> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Handle for sending events.
pub struct EventSender<M = MeshId> {
    sender: Sender<SceneEvent<M>>,
}

impl<M> Clone for EventSender<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M> EventSender<M> {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or the loop is gone; the event
    /// is dropped.
    #[inline]
    pub fn send(&self, event: SceneEvent<M>) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Scene event channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Panel edits go straight onto the bus.
impl<M> ParamListener for EventSender<M> {
    fn on_param_change(&mut self, event: &ParamEvent) {
        self.send(SceneEvent::Param(*event));
    }
}

/// Handle for receiving events.
pub struct EventReceiver<M = MeshId> {
    receiver: Receiver<SceneEvent<M>>,
}

impl<M> EventReceiver<M> {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<SceneEvent<M>> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<SceneEvent<M>> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
