use std::collections::VecDeque;

/// Handle for a frame callback handed to a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Host-side per-frame callback primitive.
///
/// The host calls [`Session::on_frame`](crate::session::Session::on_frame) with the token once
/// the requested frame comes due.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a pending request. Unknown or already-fired tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Headless FIFO scheduler: requests queue up until the host pumps them with
/// [`ManualScheduler::take_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    queue: VecDeque<FrameToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending request.
    pub fn take_due(&mut self) -> Option<FrameToken> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.queue.push_back(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.queue.retain(|t| *t != token);
    }
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for &mut F {
    fn request_frame(&mut self) -> FrameToken {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        (**self).cancel_frame(token)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
