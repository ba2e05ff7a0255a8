//! Upload worker: a dedicated thread that forwards staged files to the
//! storage bucket while the UI stays responsive.
//!
//! Jobs go in over a channel, completion/failure events come back out.
//! A failed file never aborts the rest of the queue.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::thread::{self, JoinHandle};

use crate::catalog::{Category, UploadedTrack};

use super::client::{StorageClient, object_name_for, unix_millis};

/// One file to upload. Validation has already happened by the time a job
/// is submitted; the worker only talks to storage.
#[derive(Debug)]
pub struct UploadJob {
    pub file: PathBuf,
    /// Filename minus extension, carried onto the uploaded track.
    pub title: String,
    pub section: Category,
}

#[derive(Debug)]
pub enum UploadEvent {
    Completed(UploadedTrack),
    Failed {
        file: PathBuf,
        title: String,
        error: String,
    },
}

pub struct Uploader {
    jobs: Sender<UploadJob>,
    events: Receiver<UploadEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Uploader {
    pub fn spawn(client: StorageClient) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel::<UploadJob>();
        let (events_tx, events_rx) = mpsc::channel::<UploadEvent>();

        let join = thread::spawn(move || run_worker(client, jobs_rx, events_tx));

        Self {
            jobs: jobs_tx,
            events: events_rx,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn submit(&self, job: UploadJob) -> Result<(), SendError<UploadJob>> {
        self.jobs.send(job)
    }

    /// Drain one pending event, if any. Called from the event loop tick.
    pub fn poll_event(&self) -> Option<UploadEvent> {
        self.events.try_recv().ok()
    }

    /// Close the job queue and wait for in-flight uploads to finish.
    pub fn shutdown(self) {
        drop(self.jobs);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

fn run_worker(client: StorageClient, jobs: Receiver<UploadJob>, events: Sender<UploadEvent>) {
    while let Ok(job) = jobs.recv() {
        let file_name = job
            .file
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let object_name = object_name_for(&file_name);

        tracing::info!(file = %job.file.display(), object = %object_name, "uploading");

        let event = match client.store(&job.file, &object_name) {
            Ok(url) => UploadEvent::Completed(UploadedTrack {
                id: unix_millis(),
                title: job.title,
                file: job.file,
                url,
                section: job.section,
            }),
            Err(e) => {
                tracing::warn!(file = %job.file.display(), error = %e, "upload failed");
                UploadEvent::Failed {
                    file: job.file,
                    title: job.title,
                    error: e.to_string(),
                }
            }
        };

        if events.send(event).is_err() {
            // Receiver gone: the app is shutting down.
            break;
        }
    }
}
