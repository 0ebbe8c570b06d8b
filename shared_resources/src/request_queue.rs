use std::collections::VecDeque;

use parking_lot::Mutex;

use super::request::ElevatorRequest;

/// How pending requests are held and handed to the controller.
///
/// Producers may call from any thread. Only the controller's worker dequeues.
pub trait RequestQueue: Send + Sync {
    fn enqueue(&self, request: ElevatorRequest);

    fn try_dequeue(&self) -> Option<ElevatorRequest>;

    /// Advisory only: another thread may change it right after it is read.
    fn count(&self) -> usize;

    fn snapshot(&self) -> Vec<ElevatorRequest>;
}

/// Unbounded first-in first-out queue.
#[derive(Debug, Default)]
pub struct FifoRequestQueue {
    requests: Mutex<VecDeque<ElevatorRequest>>,
}

impl FifoRequestQueue {
    pub fn new() -> Self {
        FifoRequestQueue::default()
    }
}

impl RequestQueue for FifoRequestQueue {
    fn enqueue(&self, request: ElevatorRequest) {
        self.requests.lock().push_back(request);
    }

    fn try_dequeue(&self) -> Option<ElevatorRequest> {
        self.requests.lock().pop_front()
    }

    fn count(&self) -> usize {
        self.requests.lock().len()
    }

    fn snapshot(&self) -> Vec<ElevatorRequest> {
        self.requests.lock().iter().cloned().collect()
    }
}
