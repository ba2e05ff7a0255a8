//! Upload screen state: section picker, files staged for upload, and the
//! tracks uploaded this session, grouped by section.

use std::path::PathBuf;

use crate::catalog::{Category, StagedFile, UploadedTrack};
use crate::storage::UploadEvent;

/// Which pane the cursor lives in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UploadFocus {
    Sections,
    Staged,
    Uploaded,
}

pub struct UploadState {
    pub focus: UploadFocus,
    pub section_idx: usize,
    pub staged: Vec<StagedFile>,
    pub rejected: Vec<PathBuf>,
    pub staged_idx: usize,
    pub uploaded: Vec<UploadedTrack>,
    pub uploaded_idx: usize,
    /// Jobs submitted to the worker and not yet reported back.
    pub in_flight: usize,
}

impl UploadState {
    pub fn new() -> Self {
        Self {
            focus: UploadFocus::Sections,
            section_idx: 0,
            staged: Vec::new(),
            rejected: Vec::new(),
            staged_idx: 0,
            uploaded: Vec::new(),
            uploaded_idx: 0,
            in_flight: 0,
        }
    }

    /// The section new uploads are filed under.
    pub fn section(&self) -> Category {
        Category::ALL[self.section_idx]
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            UploadFocus::Sections => UploadFocus::Staged,
            UploadFocus::Staged => UploadFocus::Uploaded,
            UploadFocus::Uploaded => UploadFocus::Sections,
        };
    }

    pub fn next(&mut self) {
        match self.focus {
            UploadFocus::Sections => {
                self.section_idx = (self.section_idx + 1) % Category::ALL.len();
            }
            UploadFocus::Staged => {
                if !self.staged.is_empty() {
                    self.staged_idx = (self.staged_idx + 1) % self.staged.len();
                }
            }
            UploadFocus::Uploaded => {
                if !self.uploaded.is_empty() {
                    self.uploaded_idx = (self.uploaded_idx + 1) % self.uploaded.len();
                }
            }
        }
    }

    pub fn prev(&mut self) {
        match self.focus {
            UploadFocus::Sections => {
                let n = Category::ALL.len();
                self.section_idx = (self.section_idx + n - 1) % n;
            }
            UploadFocus::Staged => {
                let n = self.staged.len();
                if n > 0 {
                    self.staged_idx = (self.staged_idx + n - 1) % n;
                }
            }
            UploadFocus::Uploaded => {
                let n = self.uploaded.len();
                if n > 0 {
                    self.uploaded_idx = (self.uploaded_idx + n - 1) % n;
                }
            }
        }
    }

    /// Replace the staging listing after a rescan.
    pub fn set_staging(&mut self, staged: Vec<StagedFile>, rejected: Vec<PathBuf>) {
        self.staged = staged;
        self.rejected = rejected;
        if self.staged_idx >= self.staged.len() {
            self.staged_idx = 0;
        }
    }

    pub fn selected_staged(&self) -> Option<&StagedFile> {
        self.staged.get(self.staged_idx)
    }

    pub fn selected_uploaded(&self) -> Option<&UploadedTrack> {
        self.uploaded.get(self.uploaded_idx)
    }

    /// Fold a worker event into the state; returns the message to show.
    pub fn apply_event(&mut self, event: UploadEvent) -> String {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            UploadEvent::Completed(track) => {
                let msg = format!(
                    "{} has been uploaded to the {} section",
                    track.title,
                    track.section.name()
                );
                self.uploaded.push(track);
                msg
            }
            UploadEvent::Failed { title, error, .. } => {
                format!("Failed to upload {title}: {error}")
            }
        }
    }

    /// Remove the uploaded track under the cursor. The caller stops any
    /// preview playback of it.
    pub fn remove_selected_uploaded(&mut self) -> Option<UploadedTrack> {
        if self.uploaded_idx >= self.uploaded.len() {
            return None;
        }
        let removed = self.uploaded.remove(self.uploaded_idx);
        if self.uploaded_idx >= self.uploaded.len() && self.uploaded_idx > 0 {
            self.uploaded_idx -= 1;
        }
        Some(removed)
    }

    /// Uploaded tracks grouped by section, in section order.
    pub fn grouped(&self) -> Vec<(Category, Vec<&UploadedTrack>)> {
        Category::ALL
            .iter()
            .filter_map(|&section| {
                let tracks: Vec<&UploadedTrack> = self
                    .uploaded
                    .iter()
                    .filter(|t| t.section == section)
                    .collect();
                if tracks.is_empty() {
                    None
                } else {
                    Some((section, tracks))
                }
            })
            .collect()
    }

    /// Local preview sequence: the staged source file of each upload.
    pub fn uploaded_paths(&self) -> Vec<PathBuf> {
        self.uploaded.iter().map(|t| t.file.clone()).collect()
    }
}
