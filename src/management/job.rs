use std::{future::Future, sync::Arc};

use chrono::Utc;
use serde::Serialize;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    types::{Progress, Report},
    warning,
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Idle,
    Running {
        playlist_url: String,
        progress: Option<Progress>,
        started_at: u64,
    },
    Finished {
        report: Report,
        started_at: u64,
        finished_at: u64,
    },
    Failed {
        playlist_url: String,
        error: String,
        started_at: u64,
        finished_at: u64,
    },
}

/// The web form's single analysis job.
///
/// Only one job runs at a time. A finished report stays available for download
/// until the next job starts.
pub struct JobManager {
    state: JobState,
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

impl JobManager {
    pub fn new() -> Self {
        Self {
            state: JobState::Idle,
        }
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, JobState::Running { .. })
    }

    /// Starts a new job, dropping the previous result.
    pub fn start(&mut self, playlist_url: String) -> Result<(), String> {
        if self.is_running() {
            return Err("An analysis is already running. Wait for it to finish.".to_string());
        }

        self.state = JobState::Running {
            playlist_url,
            progress: None,
            started_at: now(),
        };
        Ok(())
    }

    pub fn update_progress(&mut self, update: Progress) {
        if let JobState::Running { progress, .. } = &mut self.state {
            *progress = Some(update);
        }
    }

    pub fn finish(&mut self, report: Report) {
        self.state = JobState::Finished {
            report,
            started_at: self.started_at(),
            finished_at: now(),
        };
    }

    pub fn fail(&mut self, error: String) {
        let playlist_url = match &self.state {
            JobState::Running { playlist_url, .. } => playlist_url.clone(),
            _ => String::new(),
        };

        self.state = JobState::Failed {
            playlist_url,
            error,
            started_at: self.started_at(),
            finished_at: now(),
        };
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            JobState::Finished { report, .. } => Some(report),
            _ => None,
        }
    }

    fn started_at(&self) -> u64 {
        match &self.state {
            JobState::Running { started_at, .. }
            | JobState::Finished { started_at, .. }
            | JobState::Failed { started_at, .. } => *started_at,
            JobState::Idle => now(),
        }
    }
}

/// Runs `job` on its own task and marks the job failed if that task panics
/// or is cancelled, so the manager never stays `Running` without a worker.
pub fn spawn_supervised<F>(jobs: Arc<Mutex<JobManager>>, job: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = tokio::spawn(job).await {
            warning!("Analysis task stopped unexpectedly: {}", e);
            let mut jobs = jobs.lock().await;
            if jobs.is_running() {
                jobs.fail(format!("Analysis task stopped unexpectedly: {}", e));
            }
        }
    })
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}
