//! Shared task polling core.
//!
//! Every model client reports generation progress through the same task
//! lifecycle; [`wait_for_completion`] is the single polling loop they all
//! delegate to.

use crate::config::PollConfig;
use crate::error::{AiMusicError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Instant;
use tracing::debug;

/// Status of a music generation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    /// Whether the task has reached a state it will never leave.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// A pollable task snapshot.
///
/// Implemented by every per-model task response so the one polling loop
/// can drive them all.
pub trait TaskState {
    /// Current task status.
    fn status(&self) -> TaskStatus;

    /// Failure detail reported by the API, if any.
    fn failure_message(&self) -> Option<&str> {
        None
    }
}

/// Poll `fetch` until the task reaches a terminal state.
///
/// Returns the final snapshot on completion. A `failed` or `cancelled`
/// task is reported as [`AiMusicError::TaskFailed`]; exhausting the
/// attempt budget or the wall-clock deadline is [`AiMusicError::Timeout`].
pub async fn wait_for_completion<T, F, Fut>(poll: &PollConfig, task_id: &str, fetch: F) -> Result<T>
where
    T: TaskState,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();

    for attempt in 0..poll.max_attempts {
        let state = fetch().await?;

        match state.status() {
            TaskStatus::Completed => {
                debug!(task_id = %task_id, attempt, "Task completed");
                return Ok(state);
            }
            TaskStatus::Failed | TaskStatus::Cancelled => {
                let message = state
                    .failure_message()
                    .unwrap_or(match state.status() {
                        TaskStatus::Cancelled => "task cancelled",
                        _ => "task failed",
                    })
                    .to_string();
                return Err(AiMusicError::TaskFailed {
                    task_id: task_id.to_string(),
                    message,
                    error_code: None,
                });
            }
            TaskStatus::Pending | TaskStatus::Processing => {}
        }

        if let Some(deadline) = poll.timeout {
            if start.elapsed() >= deadline {
                return Err(AiMusicError::Timeout {
                    waited_secs: start.elapsed().as_secs(),
                });
            }
        }

        if attempt + 1 < poll.max_attempts {
            tokio::time::sleep(poll.interval).await;
        }
    }

    Err(AiMusicError::Timeout {
        waited_secs: start.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    struct Snapshot {
        status: TaskStatus,
        error: Option<String>,
    }

    impl TaskState for Snapshot {
        fn status(&self) -> TaskStatus {
            self.status
        }

        fn failure_message(&self) -> Option<&str> {
            self.error.as_deref()
        }
    }

    fn fast_poll(max_attempts: u32) -> PollConfig {
        PollConfig::new(max_attempts, Duration::from_millis(1))
    }

    #[test]
    fn terminal_states() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
    }

    #[test]
    fn status_serde_round_trip() {
        let status: TaskStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, TaskStatus::Processing);
        assert_eq!(
            serde_json::to_string(&TaskStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[tokio::test]
    async fn returns_after_pending_then_completed() {
        let calls = AtomicU32::new(0);
        let result = wait_for_completion(&fast_poll(10), "task_1", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(Snapshot {
                    status: if n < 2 {
                        TaskStatus::Pending
                    } else {
                        TaskStatus::Completed
                    },
                    error: None,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(result.status(), TaskStatus::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_task_surfaces_error_message() {
        let result = wait_for_completion(&fast_poll(10), "task_2", || async {
            Ok(Snapshot {
                status: TaskStatus::Failed,
                error: Some("out of ideas".to_string()),
            })
        })
        .await;

        match result.unwrap_err() {
            AiMusicError::TaskFailed {
                task_id, message, ..
            } => {
                assert_eq!(task_id, "task_2");
                assert_eq!(message, "out of ideas");
            }
            e => panic!("Expected TaskFailed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn cancelled_task_is_terminal() {
        let result = wait_for_completion(&fast_poll(10), "task_3", || async {
            Ok(Snapshot {
                status: TaskStatus::Cancelled,
                error: None,
            })
        })
        .await;

        match result.unwrap_err() {
            AiMusicError::TaskFailed { message, .. } => {
                assert_eq!(message, "task cancelled");
            }
            e => panic!("Expected TaskFailed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn attempt_budget_exhaustion_times_out() {
        let calls = AtomicU32::new(0);
        let result = wait_for_completion(&fast_poll(3), "task_4", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Ok(Snapshot {
                    status: TaskStatus::Processing,
                    error: None,
                })
            }
        })
        .await;

        assert!(matches!(result, Err(AiMusicError::Timeout { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn wall_clock_deadline_times_out() {
        let poll = PollConfig::new(100, Duration::from_millis(5))
            .with_timeout(Duration::from_millis(1));

        let result = wait_for_completion(&poll, "task_5", || async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok(Snapshot {
                status: TaskStatus::Pending,
                error: None,
            })
        })
        .await;

        assert!(matches!(result, Err(AiMusicError::Timeout { .. })));
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let result: Result<Snapshot> = wait_for_completion(&fast_poll(10), "task_6", || async {
            Err(AiMusicError::NotFound("task_6".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AiMusicError::NotFound(_))));
    }
}
