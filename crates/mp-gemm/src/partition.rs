use crate::error::{GemmError, Result};
use crate::queue::WorkQueue;
use crate::task::{OutPtr, Task};

/// Clamp a requested block size to the smallest relevant dimension.
///
/// A block size larger than `min(n, m, p)` is honored as that minimum rather
/// than rejected, so callers must not assume their request is used exactly.
pub(crate) fn clamp_block_size(block_size: usize, n: usize, m: usize, p: usize) -> usize {
    block_size.min(n).min(m).min(p)
}

/// Number of blocks a `block_size` tiling of an `n` x `p` output produces:
/// the grid of full blocks, plus a partial column of blocks when `p` does
/// not divide evenly, a partial row when `n` does not, and a corner block
/// when neither does.
pub(crate) fn block_count(n: usize, p: usize, block_size: usize) -> usize {
    let full_rows = n / block_size;
    let full_cols = p / block_size;
    let mut count = full_rows * full_cols;
    if p % block_size != 0 {
        count += full_rows;
    }
    if n % block_size != 0 {
        count += full_cols;
    }
    if n % block_size != 0 && p % block_size != 0 {
        count += 1;
    }
    count
}

/// Split the `n` x `p` output into disjoint rectangles and enqueue one task
/// per rectangle. The queue is sized to the exact block count before any
/// task is created; a failed enqueue therefore means the count formula and
/// the tiling loop disagree, which is a bug, not a runtime condition.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_queue<'a>(
    a: &'a [f64],
    b: &'a [f64],
    c: OutPtr,
    n: usize,
    m: usize,
    p: usize,
    block_size: usize,
) -> Result<WorkQueue<'a>> {
    let capacity = block_count(n, p, block_size);
    let mut queue = WorkQueue::with_capacity(capacity);

    for row_start in (0..n).step_by(block_size) {
        let row_end = (row_start + block_size).min(n);
        for col_start in (0..p).step_by(block_size) {
            let col_end = (col_start + block_size).min(p);
            let task = Task::new(
                a, b, c, m, p, block_size, row_start, col_start, row_end, col_end,
            );
            if !queue.enqueue(task) {
                return Err(GemmError::QueueFull { capacity });
            }
        }
    }

    debug_assert_eq!(queue.len(), capacity);
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_count_divisible() {
        // 6x8 in 2x2 blocks: a 3x4 grid
        assert_eq!(block_count(6, 8, 2), 12);
    }

    #[test]
    fn test_block_count_partial_cols() {
        // 4x7 in 2x2 blocks: 2x3 full grid + 2 edge blocks on the right
        assert_eq!(block_count(4, 7, 2), 8);
    }

    #[test]
    fn test_block_count_partial_rows() {
        // 7x4 in 2x2 blocks: 3x2 full grid + 2 edge blocks at the bottom
        assert_eq!(block_count(7, 4, 2), 8);
    }

    #[test]
    fn test_block_count_partial_both() {
        // 5x7 in 2x2 blocks: 2x3 grid + 2 right + 3 bottom + 1 corner
        assert_eq!(block_count(5, 7, 2), 12);
    }

    #[test]
    fn test_block_count_single_block() {
        assert_eq!(block_count(3, 3, 3), 1);
        assert_eq!(block_count(1, 1, 1), 1);
    }

    #[test]
    fn test_clamp_block_size() {
        assert_eq!(clamp_block_size(64, 3, 5, 4), 3);
        assert_eq!(clamp_block_size(2, 3, 5, 4), 2);
        assert_eq!(clamp_block_size(4, 8, 8, 4), 4);
    }

    #[test]
    fn test_tasks_cover_output_exactly_once() {
        // dimensions chosen so both axes have partial edge blocks
        let (n, m, p, bs) = (5, 4, 7, 2);
        let a = vec![0.0; n * m];
        let b = vec![0.0; m * p];
        let mut c = vec![0.0; n * p];
        let out = OutPtr::new(&mut c);

        let mut queue = build_queue(&a, &b, out, n, m, p, bs).unwrap();
        assert_eq!(queue.capacity(), block_count(n, p, bs));

        let mut hits = vec![0usize; n * p];
        while let Some(task) = queue.dequeue() {
            let (r0, c0, r1, c1) = task.bounds();
            assert!(r1 <= n && c1 <= p);
            assert!(r0 < r1 && c0 < c1);
            for i in r0..r1 {
                for j in c0..c1 {
                    hits[i * p + j] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&h| h == 1));
    }

    #[test]
    fn test_queue_sized_exactly() {
        let (n, m, p, bs) = (6, 3, 6, 2);
        let a = vec![0.0; n * m];
        let b = vec![0.0; m * p];
        let mut c = vec![0.0; n * p];
        let out = OutPtr::new(&mut c);

        let queue = build_queue(&a, &b, out, n, m, p, bs).unwrap();
        assert_eq!(queue.len(), 9);
        assert_eq!(queue.capacity(), 9);
    }
}
