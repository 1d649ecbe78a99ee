//! Pending element-pick requests.
//!
//! At most one request is open. Opening another rejects the previous one
//! with [`PickError::Superseded`]; closing the picker without a choice
//! rejects it with [`PickError::Dismissed`].

use futures::FutureExt;
use futures::channel::oneshot;
use lewis_core::{ElementNumber, Vector2};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    #[error("element pick request was superseded by a newer one")]
    Superseded,
    #[error("element picker was dismissed")]
    Dismissed,
}

/// Identifies one pick request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickToken(u64);

type PickResult = Result<ElementNumber, PickError>;

/// Resolves once the picker yields an element or the request is rejected.
#[derive(Debug)]
pub struct PickRequest {
    token: PickToken,
    receiver: oneshot::Receiver<PickResult>,
}

impl PickRequest {
    pub fn token(&self) -> PickToken {
        self.token
    }
}

impl Future for PickRequest {
    type Output = PickResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            // A dropped sender means the picker went away without an answer
            .map(|received| received.unwrap_or(Err(PickError::Dismissed)))
    }
}

#[derive(Debug)]
struct PendingPick {
    token: PickToken,
    anchor: Vector2,
    sender: oneshot::Sender<PickResult>,
}

#[derive(Debug, Default)]
pub struct ElementPicker {
    pending: Option<PendingPick>,
    issued: u64,
}

impl ElementPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Open a new request anchored at `anchor`, rejecting any open one.
    pub fn request(&mut self, anchor: Vector2) -> PickRequest {
        self.reject(PickError::Superseded);
        self.issued += 1;
        let token = PickToken(self.issued);
        let (sender, receiver) = oneshot::channel();
        self.pending = Some(PendingPick {
            token,
            anchor,
            sender,
        });
        log::debug!("picker: opened request {token:?}");
        PickRequest { token, receiver }
    }

    /// Resolve the open request. Returns the request's anchor, or `None`
    /// when nothing was waiting.
    pub fn resolve(&mut self, element: ElementNumber) -> Option<Vector2> {
        let pending = self.pending.take()?;
        log::debug!("picker: request {:?} picked {element}", pending.token);
        // The caller may have stopped waiting; the pick still counts
        let _ = pending.sender.send(Ok(element));
        Some(pending.anchor)
    }

    pub fn dismiss(&mut self) {
        self.reject(PickError::Dismissed);
    }

    fn reject(&mut self, reason: PickError) {
        if let Some(pending) = self.pending.take() {
            log::debug!("picker: request {:?} rejected: {reason}", pending.token);
            let _ = pending.sender.send(Err(reason));
        }
    }
}
