//! Per-item results and the run summary.

use serde::Serialize;
use std::path::PathBuf;

use crate::links::UrlMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Ok,
    Error,
}

/// Final outcome of one work item. Built only through [`PendingResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    pub url: String,
    pub id: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl EnrichmentResult {
    pub fn is_ok(&self) -> bool {
        self.status == ItemStatus::Ok
    }
}

/// An item that has started processing; finalized exactly once by consuming it.
#[derive(Debug)]
#[must_use = "a pending result must be finalized with ok() or error()"]
pub struct PendingResult {
    url: String,
    id: String,
}

impl PendingResult {
    pub fn begin(item: &UrlMatch) -> Self {
        Self {
            url: item.url.clone(),
            id: item.id.clone(),
        }
    }

    pub fn ok(self, output_path: PathBuf) -> EnrichmentResult {
        EnrichmentResult {
            url: self.url,
            id: self.id,
            status: ItemStatus::Ok,
            output_path: Some(output_path),
            error_message: None,
        }
    }

    pub fn error(self, message: impl Into<String>) -> EnrichmentResult {
        EnrichmentResult {
            url: self.url,
            id: self.id,
            status: ItemStatus::Error,
            output_path: None,
            error_message: Some(message.into()),
        }
    }
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentReport {
    pub video: Vec<EnrichmentResult>,
    pub post: Vec<EnrichmentResult>,
}

impl EnrichmentReport {
    pub fn saved(&self) -> usize {
        self.video.iter().chain(&self.post).filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.video.iter().chain(&self.post).filter(|r| !r.is_ok()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
