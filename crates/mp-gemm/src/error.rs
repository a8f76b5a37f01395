use thiserror::Error;

#[derive(Error, Debug)]
pub enum GemmError {
    #[error("matmul dimension mismatch: [{n}x{m}] * [{m2}x{p}] into [{c_rows}x{c_cols}]")]
    DimensionMismatch {
        n: usize,
        m: usize,
        m2: usize,
        p: usize,
        c_rows: usize,
        c_cols: usize,
    },
    #[error("block size must be non-zero")]
    ZeroBlockSize,
    #[error("thread count must be non-zero")]
    ZeroThreadCount,
    #[error("work queue is full (capacity {capacity}); the partitioner sized it wrong")]
    QueueFull { capacity: usize },
    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
    #[error("a worker thread panicked")]
    WorkerPanic,
    #[error(transparent)]
    Matrix(#[from] mp_matrix::MatrixError),
}

pub type Result<T> = std::result::Result<T, GemmError>;
