//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Stops the background progress logger and waits for it to exit.
///
/// `cancel` must be the logger's own token (a child of the run token, or
/// independent of it), never the token workers watch, or a normal shutdown
/// would look like an interrupted run.
pub async fn shutdown_gracefully(cancel: CancellationToken, logging_task: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        if let Err(e) = logging_task.await {
            log::debug!("Progress logger ended abnormally: {e}");
        }
    }
}
