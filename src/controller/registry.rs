use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::task::JoinHandle;

/// A job the dashboard is watching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTicket {
    pub id: String,
    pub label: String,
}

/// Owns a spawned task. Dropping a handle that still owns its task aborts it.
#[derive(Debug)]
pub struct ScopedTask<T> {
    task: Option<JoinHandle<T>>,
}

impl<T> ScopedTask<T> {
    pub fn new(task: JoinHandle<T>) -> Self {
        Self { task: Some(task) }
    }

    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Let the task run to completion on its own.
    pub fn detach(mut self) {
        self.task.take();
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// How a poll loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PollExit {
    Completed,
    Failed,
    TransportError,
    TimedOut,
    /// The entry was cancelled or replaced before the loop could finish.
    Superseded,
}

struct ActiveJob {
    label: String,
    generation: u64,
    handle: ScopedTask<PollExit>,
}

/// Job id → poll task. At most one entry, and so one live poll, per id.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<String, ActiveJob>>,
    generations: AtomicU64,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ActiveJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Register a poll. Any poll already registered under the same id is
    /// aborted. Returns true when an earlier poll was replaced.
    pub fn insert(
        &self,
        ticket: &JobTicket,
        generation: u64,
        handle: ScopedTask<PollExit>,
    ) -> bool {
        let previous = self.lock().insert(
            ticket.id.clone(),
            ActiveJob {
                label: ticket.label.clone(),
                generation,
                handle,
            },
        );
        match previous {
            Some(old) => {
                old.handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Called by a poll task that reached a terminal state. Removes the
    /// entry only if it still belongs to that task. Returns false when the
    /// task was cancelled or replaced in the meantime.
    pub fn release(&self, job_id: &str, generation: u64) -> bool {
        let mut jobs = self.lock();
        match jobs.get(job_id) {
            Some(job) if job.generation == generation => {
                if let Some(job) = jobs.remove(job_id) {
                    job.handle.detach();
                }
                true
            }
            _ => false,
        }
    }

    /// Abort and remove a poll. Returns its ticket if there was one.
    pub fn cancel(&self, job_id: &str) -> Option<JobTicket> {
        let job = self.lock().remove(job_id)?;
        job.handle.cancel();
        Some(JobTicket {
            id: job_id.to_string(),
            label: job.label,
        })
    }

    /// Abort every poll. Returns how many were running.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<ActiveJob> = self.lock().drain().map(|(_, job)| job).collect();
        let count = drained.len();
        for job in drained {
            job.handle.cancel();
        }
        count
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.lock().contains_key(job_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Active jobs, sorted by id.
    pub fn tickets(&self) -> Vec<JobTicket> {
        let mut tickets: Vec<JobTicket> = self
            .lock()
            .iter()
            .map(|(id, job)| JobTicket {
                id: id.clone(),
                label: job.label.clone(),
            })
            .collect();
        tickets.sort_by(|a, b| a.id.cmp(&b.id));
        tickets
    }
}
