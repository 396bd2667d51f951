//! Core report types.
//!
//! This module defines the report record itself along with the fixed
//! faculty enumeration, the lifecycle status values, and inline file
//! attachments.

use std::path::Path;

use base64::Engine as _;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel stored in both reporter identity fields of an anonymous
/// submission.
pub const ANONYMOUS_REPORTER: &str = "Anonim";

/// Lifecycle status of a report.
///
/// Transitions are unconstrained: any status may follow any other, and a
/// resolved report can still be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Filed, not yet acted on.
    Unresolved,
    /// Being followed up by the administrator.
    InProgress,
    /// Handling finished.
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Academic unit a report is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faculty {
    /// Fakultas Ekonomi.
    Ekonomi,
    /// Fakultas Hukum.
    Hukum,
    /// Fakultas Teknik.
    Teknik,
    /// Fakultas Kedokteran.
    Kedokteran,
    /// Fakultas Pertanian.
    Pertanian,
    /// Fakultas Keguruan dan Ilmu Pendidikan.
    Fkip,
    /// Fakultas Ilmu Sosial dan Ilmu Politik.
    Fisip,
    /// Fakultas MIPA.
    Mipa,
    /// Fakultas Ilmu Komputer.
    Fasilkom,
    /// Fakultas Kesehatan Masyarakat.
    Fkm,
}

impl Faculty {
    /// Every faculty, in the fixed enumeration order used for aggregation.
    pub const ALL: [Self; 10] = [
        Self::Ekonomi,
        Self::Hukum,
        Self::Teknik,
        Self::Kedokteran,
        Self::Pertanian,
        Self::Fkip,
        Self::Fisip,
        Self::Mipa,
        Self::Fasilkom,
        Self::Fkm,
    ];

    /// Full display name of the faculty.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ekonomi => "Fakultas Ekonomi",
            Self::Hukum => "Fakultas Hukum",
            Self::Teknik => "Fakultas Teknik",
            Self::Kedokteran => "Fakultas Kedokteran",
            Self::Pertanian => "Fakultas Pertanian",
            Self::Fkip => "Fakultas Keguruan dan Ilmu Pendidikan",
            Self::Fisip => "Fakultas Ilmu Sosial dan Ilmu Politik",
            Self::Mipa => "Fakultas MIPA",
            Self::Fasilkom => "Fakultas Ilmu Komputer",
            Self::Fkm => "Fakultas Kesehatan Masyarakat",
        }
    }
}

impl std::fmt::Display for Faculty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A file stored inline with a report.
///
/// The payload is carried by value: the snapshot holds the base64-encoded
/// contents, not a reference to external storage. No size limit is
/// enforced, so large files grow the snapshot accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub name: String,

    /// Media type, e.g. `image/png`.
    pub media_type: String,

    /// Base64-encoded file contents.
    pub data: String,

    /// BLAKE3 hash of the raw contents.
    pub content_hash: String,
}

impl Attachment {
    /// Create an attachment from raw bytes.
    ///
    /// Encodes the payload and computes its content hash.
    #[must_use]
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            content_hash: blake3::hash(bytes).to_hex().to_string(),
        }
    }

    /// Create an attachment by reading a file from disk.
    ///
    /// The media type is guessed from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::AttachmentRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let media_type = media_type_for(path);
        Ok(Self::from_bytes(name, media_type, &bytes))
    }

    /// Decode the payload back to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|source| Error::AttachmentDecode {
                name: self.name.clone(),
                source,
            })
    }

    /// Size of the encoded payload in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.data.len()
    }
}

/// Guess a media type from a file extension.
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A single submitted incident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique opaque identifier, assigned at submission and immutable.
    pub id: String,

    /// Faculty the incident is attributed to.
    pub faculty: Faculty,

    /// Short title of the complaint.
    pub title: String,

    /// Free-text narrative of the incident.
    pub description: String,

    /// Reporter's name; the anonymous sentinel for anonymous submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,

    /// Reporter's student or staff number; sentinel when anonymous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,

    /// When the incident happened.
    pub incident_date: NaiveDate,

    /// When the report was filed. Set at creation, never changed.
    pub reported_at: NaiveDate,

    /// Current lifecycle status.
    pub status: ReportStatus,

    /// Cached text of a saved AI assessment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_assessment: Option<String>,

    /// Evidence supplied by the reporter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Attachment>,

    /// Victim identities recorded during investigation (admin-only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim_identities: Option<String>,

    /// Witness identities recorded during investigation (admin-only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness_identities: Option<String>,

    /// Chronological investigation notes (admin-only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigation_process: Option<String>,

    /// Recommended disciplinary action (admin-only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanction_recommendation: Option<String>,

    /// Signed sanction decree attachment (admin-only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanction_sk: Option<Attachment>,
}

impl Report {
    /// Whether this report was filed anonymously.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.reporter_name.as_deref() == Some(ANONYMOUS_REPORTER)
    }
}

/// Reporter-supplied fields for a new submission.
///
/// Identity, timestamp, and status are assigned by the lifecycle
/// controller, not the reporter.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    /// Short title of the complaint.
    pub title: String,

    /// Free-text narrative of the incident.
    pub description: String,

    /// Faculty the incident is attributed to.
    pub faculty: Faculty,

    /// When the incident happened.
    pub incident_date: NaiveDate,

    /// Reporter's name, if not anonymous.
    pub reporter_name: Option<String>,

    /// Reporter's student or staff number, if not anonymous.
    pub reporter_id: Option<String>,

    /// Whether identity fields should be replaced with the sentinel.
    pub anonymous: bool,

    /// Evidence file, if any.
    pub evidence: Option<Attachment>,
}

/// Admin-only investigation fields applied during an update.
///
/// A field left as `None` is untouched; `Some` overwrites the stored
/// value. Clearing a field is expressed with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUpdate {
    /// Victim identities.
    pub victim_identities: Option<String>,

    /// Witness identities.
    pub witness_identities: Option<String>,

    /// Investigation notes.
    pub investigation_process: Option<String>,

    /// Recommended disciplinary action.
    pub sanction_recommendation: Option<String>,

    /// Signed sanction decree attachment.
    pub sanction_sk: Option<Attachment>,

    /// Saved AI assessment text.
    pub ai_assessment: Option<String>,
}

impl AdminUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.victim_identities.is_none()
            && self.witness_identities.is_none()
            && self.investigation_process.is_none()
            && self.sanction_recommendation.is_none()
            && self.sanction_sk.is_none()
            && self.ai_assessment.is_none()
    }
}
