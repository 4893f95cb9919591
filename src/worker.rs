use crate::error::{Result, TranscodeError};
use crate::inspect::InputImage;
use crate::package::{OptimizeResponse, TranscodeResult};
use crate::pipeline::Transcoder;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error};

/// Dedicated CPU pool for transcodes, so an async host never runs the
/// pipeline on its event loop threads.
#[derive(Clone)]
pub struct TranscodePool {
    pool: Arc<ThreadPool>,
    transcoder: Transcoder,
}

impl TranscodePool {
    pub fn new(transcoder: Transcoder) -> Result<Self> {
        let workers = transcoder.config().workers;
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("img-optimize-{}", idx))
            .build()
            .map_err(|e| TranscodeError::Worker(format!("failed to build thread pool: {}", e)))?;

        debug!(workers, "transcode pool ready");

        Ok(Self {
            pool: Arc::new(pool),
            transcoder,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    /// Runs a transcode on the pool and blocks until it finishes.
    pub fn run(&self, input: InputImage) -> Result<TranscodeResult> {
        let transcoder = &self.transcoder;
        self.install_job(|| transcoder.transcode(input))?
    }

    /// Blocking counterpart of [`TranscodePool::optimize`].
    pub fn optimize_blocking(
        &self,
        raw_bytes: Vec<u8>,
        original_filename: &str,
        original_size_hint: Option<u64>,
    ) -> OptimizeResponse {
        let original_size = raw_bytes.len() as u64;
        let transcoder = &self.transcoder;

        self.install_job(|| transcoder.optimize(raw_bytes, original_filename, original_size_hint))
            .unwrap_or_else(|e| worker_failure(e, original_size))
    }

    /// Queues a transcode on the pool and awaits its result without blocking
    /// the calling task.
    pub async fn submit(&self, input: InputImage) -> Result<TranscodeResult> {
        let transcoder = self.transcoder.clone();
        self.spawn_job(move || transcoder.transcode(input)).await?
    }

    /// Async counterpart of [`Transcoder::optimize`].
    pub async fn optimize(
        &self,
        raw_bytes: Vec<u8>,
        original_filename: String,
        original_size_hint: Option<u64>,
    ) -> OptimizeResponse {
        let original_size = raw_bytes.len() as u64;
        let transcoder = self.transcoder.clone();

        self.spawn_job(move || {
            transcoder.optimize(raw_bytes, &original_filename, original_size_hint)
        })
        .await
        .unwrap_or_else(|e| worker_failure(e, original_size))
    }

    /// Runs `job` on the pool, turning a panic into a worker error.
    fn install_job<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.pool
            .install(|| panic::catch_unwind(AssertUnwindSafe(job)))
            .map_err(|_| TranscodeError::Worker("transcode task panicked".to_string()))
    }

    /// Spawns `job` on the pool. A panicking job is caught before it reaches
    /// rayon, which would otherwise abort the process.
    async fn spawn_job<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            let _ = tx.send(outcome);
        });

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(TranscodeError::Worker("transcode task panicked".to_string())),
            Err(_) => Err(TranscodeError::Worker("transcode task was dropped".to_string())),
        }
    }
}

fn worker_failure(e: TranscodeError, original_size: u64) -> OptimizeResponse {
    error!(kind = %e.kind(), "error optimizing image: {}", e);
    e.into_failure(original_size).into()
}
