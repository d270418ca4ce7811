//! Process-wide registry of recurring jobs, keyed by chat.
//!
//! `JobRegistry` owns every live `JobHandle`. Mutations take the DashMap
//! entry lock for the affected chat only, so chats never contend on each
//! other's entries. Scheduler calls made under that lock are synchronous;
//! no guard is ever held across an `.await`.

use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use focusbot_types::chat::ChatId;
use focusbot_types::error::SchedulerError;

use super::job::{JobCallback, JobHandle};
use super::scheduler::Scheduler;

/// Chat id -> active job handles.
pub struct JobRegistry<S: Scheduler> {
    scheduler: S,
    jobs: DashMap<ChatId, Vec<JobHandle>>,
}

impl<S: Scheduler> JobRegistry<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            jobs: DashMap::new(),
        }
    }

    /// Schedule an additional job for `chat_id`.
    ///
    /// Existing jobs for the chat are left running; use [`replace`](Self::replace)
    /// to keep at most one.
    pub fn register(
        &self,
        chat_id: ChatId,
        interval: Duration,
        first_delay: Duration,
        callback: JobCallback,
    ) -> Result<JobHandle, SchedulerError> {
        let mut entry = self.jobs.entry(chat_id).or_default();
        let handle = match self
            .scheduler
            .schedule_repeating(chat_id, interval, first_delay, callback)
        {
            Ok(handle) => handle,
            Err(err) => {
                let empty = entry.is_empty();
                drop(entry);
                if empty {
                    self.jobs.remove_if(&chat_id, |_, handles| handles.is_empty());
                }
                return Err(err);
            }
        };
        entry.push(handle.clone());
        Ok(handle)
    }

    /// Cancel every job for `chat_id` and install a new one, atomically.
    ///
    /// The chat's entry stays locked from the first cancellation until the
    /// new handle is stored, so no other mutation for this chat can observe
    /// the gap. If scheduling the new job fails, the chat ends up with no jobs.
    pub fn replace(
        &self,
        chat_id: ChatId,
        interval: Duration,
        first_delay: Duration,
        callback: JobCallback,
    ) -> Result<JobHandle, SchedulerError> {
        let mut entry = self.jobs.entry(chat_id).or_default();

        let replaced = entry.len();
        for old in entry.drain(..) {
            self.scheduler.cancel(&old);
        }

        let handle = match self
            .scheduler
            .schedule_repeating(chat_id, interval, first_delay, callback)
        {
            Ok(handle) => handle,
            Err(err) => {
                drop(entry);
                self.jobs.remove_if(&chat_id, |_, handles| handles.is_empty());
                return Err(err);
            }
        };
        entry.push(handle.clone());

        if replaced > 0 {
            tracing::info!(%chat_id, replaced, job_id = %handle.id(), "replaced existing jobs");
        }
        Ok(handle)
    }

    /// Cancel and forget every job tagged with `chat_id`.
    ///
    /// Returns the number of jobs cancelled; zero when the chat has none.
    pub fn cancel_all(&self, chat_id: ChatId) -> usize {
        match self.jobs.entry(chat_id) {
            Entry::Occupied(entry) => {
                for handle in entry.get() {
                    self.scheduler.cancel(handle);
                }
                let (_, handles) = entry.remove_entry();
                handles.len()
            }
            Entry::Vacant(_) => 0,
        }
    }

    /// Handles currently registered for `chat_id`.
    ///
    /// Returned handles are clones; no map guard is held after return.
    pub fn find_by_tag(&self, chat_id: ChatId) -> Vec<JobHandle> {
        self.jobs
            .get(&chat_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Snapshot of chats with at least one job.
    pub fn active_chats(&self) -> Vec<ChatId> {
        let mut chats: Vec<ChatId> = self.jobs.iter().map(|r| *r.key()).collect();
        chats.sort();
        chats
    }

    /// Number of chats with at least one job.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Total number of registered jobs across all chats.
    pub fn job_count(&self) -> usize {
        self.jobs.iter().map(|r| r.value().len()).sum()
    }

    /// Cancel every job in the registry. Used at process shutdown.
    pub fn shutdown(&self) -> usize {
        let mut cancelled = 0;
        self.jobs.retain(|_, handles| {
            for handle in handles.iter() {
                self.scheduler.cancel(handle);
            }
            cancelled += handles.len();
            false
        });
        tracing::info!(cancelled, "job registry shut down");
        cancelled
    }
}

impl<S: Scheduler> Drop for JobRegistry<S> {
    fn drop(&mut self) {
        for entry in self.jobs.iter() {
            for handle in entry.value() {
                handle.cancel();
            }
        }
    }
}
