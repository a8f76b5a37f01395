use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::error::{GemmError, Result};
use crate::queue::WorkQueue;
use crate::task::Task;

/// A block kernel run by the workers, one task at a time.
pub(crate) type Kernel = for<'t> fn(&Task<'t>);

/// Spawn `num_threads` workers over the queue and join them all before
/// returning. Each worker holds the lock only for the O(1) dequeue, never
/// across kernel execution.
///
/// If spawning thread `i` fails, the cancellation flag stops threads
/// `0..i` at their next task boundary, everything spawned is joined, and
/// the spawn error is returned; C's contents are unspecified in that case.
pub(crate) fn run_workers(
    queue: Mutex<WorkQueue<'_>>,
    num_threads: usize,
    kernel: Kernel,
) -> Result<()> {
    let cancel = AtomicBool::new(false);
    let queue = &queue;
    let cancel = &cancel;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_threads);
        for i in 0..num_threads {
            let builder = thread::Builder::new().name(format!("mp-gemm-worker-{i}"));
            match builder.spawn_scoped(scope, move || worker_loop(queue, cancel, kernel)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    cancel.store(true, Ordering::Relaxed);
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(GemmError::ThreadSpawn(err));
                }
            }
        }

        let mut panicked = false;
        for handle in handles {
            if handle.join().is_err() {
                // let the remaining workers wind down instead of racing on
                // a queue whose invariants we no longer trust
                cancel.store(true, Ordering::Relaxed);
                panicked = true;
            }
        }
        if panicked {
            Err(GemmError::WorkerPanic)
        } else {
            Ok(())
        }
    })
}

fn worker_loop(queue: &Mutex<WorkQueue<'_>>, cancel: &AtomicBool, kernel: Kernel) {
    loop {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let task = match queue.lock() {
            Ok(mut guard) => guard.dequeue(),
            // a poisoned lock means another worker panicked; bail out
            Err(_) => return,
        };
        match task {
            Some(task) => kernel(&task),
            None => return,
        }
    }
}
