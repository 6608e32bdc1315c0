//! One-shot slot for an asynchronously loaded asset.
//!
//! The loader resolves on its own task and sends the result through a
//! channel; the slot is polled from the update loop's execution context, so
//! the payload is only ever joined into the scene graph from there. The
//! lifecycle is one-way: `Pending` transitions exactly once to `Loaded` or
//! `Failed` and stays there. A failed load degrades the scene (no avatar),
//! it never stops the loop.

use std::sync::mpsc::{Receiver, TryRecvError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug)]
pub struct AssetSlot<T> {
    receiver: Option<Receiver<anyhow::Result<T>>>,
    state: AssetState,
}

impl<T> AssetSlot<T> {
    pub fn pending(receiver: Receiver<anyhow::Result<T>>) -> Self {
        Self {
            receiver: Some(receiver),
            state: AssetState::Pending,
        }
    }

    /// Check for a resolution. Returns the payload exactly once, on the call
    /// that observes the successful load; every later call returns `None`.
    pub fn poll(&mut self) -> Option<T> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(Ok(payload)) => {
                self.state = AssetState::Loaded;
                self.receiver = None;
                Some(payload)
            }
            Ok(Err(e)) => {
                log::warn!("asset load failed, continuing without it: {:#}", e);
                self.state = AssetState::Failed;
                self.receiver = None;
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("asset loader dropped without a result");
                self.state = AssetState::Failed;
                self.receiver = None;
                None
            }
        }
    }

    pub fn state(&self) -> AssetState {
        self.state
    }
}
