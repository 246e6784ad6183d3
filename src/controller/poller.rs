use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::controller::registry::{JobTicket, PollExit};
use crate::controller::Dashboard;
use crate::models::task::{JobState, TaskStatus};
use crate::services::backend::BackendError;

/// Why a poll loop stopped.
#[derive(Debug)]
pub(crate) enum Terminal {
    Completed(TaskStatus),
    Failed(TaskStatus),
    Transport(BackendError),
    TimedOut { attempts: u32 },
}

/// Poll `GET /api/tasks/{id}` until the job reaches a terminal state.
///
/// The loop does not start until `start` fires, which happens once the
/// task's handle is in the registry.
pub(crate) async fn run(
    dashboard: Arc<Dashboard>,
    ticket: JobTicket,
    generation: u64,
    start: oneshot::Receiver<()>,
) -> PollExit {
    if start.await.is_err() {
        return PollExit::Superseded;
    }

    let settings = dashboard.poll_settings().clone();
    let started = Instant::now();
    let mut ticker = time::interval_at(started + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempts: u32 = 0;

    let terminal = loop {
        ticker.tick().await;
        attempts = attempts.saturating_add(1);
        metrics::counter!("dashboard_polls_total").increment(1);

        match dashboard.backend().task(&ticket.id).await {
            Ok(status) => match status.status {
                JobState::Completed => break Terminal::Completed(status),
                JobState::Error => break Terminal::Failed(status),
                JobState::Running | JobState::Unknown => {
                    tracing::trace!(job_id = %ticket.id, attempts, "Job still running");
                }
            },
            Err(e) => break Terminal::Transport(e),
        }

        let attempts_exhausted = settings.max_attempts.is_some_and(|max| attempts >= max);
        let deadline_passed = settings
            .timeout
            .is_some_and(|timeout| started.elapsed() >= timeout);
        if attempts_exhausted || deadline_passed {
            break Terminal::TimedOut { attempts };
        }
    };

    dashboard.finish_job(&ticket, generation, terminal)
}
