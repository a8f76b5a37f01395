use crate::task::Task;

/// A bounded FIFO of tasks backed by a circular buffer.
///
/// The queue never grows: the partitioner computes the exact block count up
/// front and sizes it once. It also carries no lock of its own; the worker
/// pool wraps one queue instance in a `Mutex`, so unrelated multiplications
/// running concurrently never contend with each other.
#[derive(Debug)]
pub struct WorkQueue<'a> {
    buf: Vec<Option<Task<'a>>>,
    size: usize,
    front: usize,
    rear: usize,
}

impl<'a> WorkQueue<'a> {
    /// Create an empty queue able to hold `capacity` tasks.
    pub fn with_capacity(capacity: usize) -> Self {
        WorkQueue {
            buf: vec![None; capacity],
            size: 0,
            front: 0,
            rear: 0,
        }
    }

    /// Maximum number of tasks the queue can hold.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True when no tasks remain.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Append a task at the rear. Returns false (and leaves the queue
    /// untouched) when the queue is full; it never blocks or grows.
    pub fn enqueue(&mut self, task: Task<'a>) -> bool {
        if self.size == self.buf.len() {
            return false;
        }
        self.buf[self.rear] = Some(task);
        self.rear = (self.rear + 1) % self.buf.len();
        self.size += 1;
        true
    }

    /// Remove and return the front task, or `None` when empty. Never blocks.
    pub fn dequeue(&mut self) -> Option<Task<'a>> {
        if self.size == 0 {
            return None;
        }
        let task = self.buf[self.front].take();
        self.front = (self.front + 1) % self.buf.len();
        self.size -= 1;
        task
    }

    /// Remove up to `max` tasks from the front, in FIFO order. Returns fewer
    /// (possibly zero) when the queue holds fewer.
    pub fn dequeue_batch(&mut self, max: usize) -> Vec<Task<'a>> {
        let count = max.min(self.size);
        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            // size > 0 for each iteration, so dequeue cannot return None
            if let Some(task) = self.dequeue() {
                batch.push(task);
            }
        }
        batch
    }

    /// The front task without removing it, or `None` when empty.
    pub fn peek(&self) -> Option<&Task<'a>> {
        if self.size == 0 {
            return None;
        }
        self.buf[self.front].as_ref()
    }
}
