//! Report lifecycle operations.
//!
//! Submission assigns identity, timestamp, and the default status; updates
//! apply a status change and merge admin investigation fields into the
//! matching record.

use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::{AdminUpdate, Report, ReportDraft, ReportStatus, ANONYMOUS_REPORTER};

/// Prefix shared by every generated report id.
const ID_PREFIX: &str = "REP-";

/// Generate a fresh id not present in `existing`.
///
/// Ids are `REP-` plus six uppercase hex digits; candidates are re-drawn
/// until one is unused.
fn generate_id<R: Rng>(rng: &mut R, existing: &[Report]) -> String {
    loop {
        let suffix: u32 = rng.gen_range(0..0x0100_0000);
        let candidate = format!("{ID_PREFIX}{suffix:06X}");
        if !existing.iter().any(|r| r.id == candidate) {
            return candidate;
        }
    }
}

/// Build a new report from a reporter-supplied draft.
///
/// Assigns a fresh id unique within `existing`, stamps `reported_at` with
/// `today`, and defaults the status to [`ReportStatus::Unresolved`].
/// Anonymous drafts have both reporter identity fields replaced with the
/// anonymous sentinel, regardless of what the draft carried.
///
/// No validation is performed beyond what the input layer already
/// enforced.
#[must_use]
pub fn submit(draft: ReportDraft, existing: &[Report], today: NaiveDate) -> Report {
    let mut rng = rand::thread_rng();
    let id = generate_id(&mut rng, existing);

    let (reporter_name, reporter_id) = if draft.anonymous {
        (
            Some(ANONYMOUS_REPORTER.to_string()),
            Some(ANONYMOUS_REPORTER.to_string()),
        )
    } else {
        (draft.reporter_name, draft.reporter_id)
    };

    debug!("submitting report {id}");
    Report {
        id,
        faculty: draft.faculty,
        title: draft.title,
        description: draft.description,
        reporter_name,
        reporter_id,
        incident_date: draft.incident_date,
        reported_at: today,
        status: ReportStatus::Unresolved,
        ai_assessment: None,
        evidence: draft.evidence,
        victim_identities: None,
        witness_identities: None,
        investigation_process: None,
        sanction_recommendation: None,
        sanction_sk: None,
    }
}

/// Apply a status change and admin fields to the report with `id`.
///
/// Only the status and the fields present in `fields` change on the
/// matching record; every other field and every other record is left
/// untouched. Returns the position of the updated record.
///
/// # Errors
///
/// Returns [`Error::ReportNotFound`] if no report has the given id; the
/// collection is not modified in that case.
pub fn update(
    reports: &mut [Report],
    id: &str,
    new_status: ReportStatus,
    fields: &AdminUpdate,
) -> Result<usize> {
    let position = reports
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| Error::ReportNotFound { id: id.to_string() })?;

    let report = &mut reports[position];
    report.status = new_status;
    if let Some(value) = &fields.victim_identities {
        report.victim_identities = Some(value.clone());
    }
    if let Some(value) = &fields.witness_identities {
        report.witness_identities = Some(value.clone());
    }
    if let Some(value) = &fields.investigation_process {
        report.investigation_process = Some(value.clone());
    }
    if let Some(value) = &fields.sanction_recommendation {
        report.sanction_recommendation = Some(value.clone());
    }
    if let Some(value) = &fields.sanction_sk {
        report.sanction_sk = Some(value.clone());
    }
    if let Some(value) = &fields.ai_assessment {
        report.ai_assessment = Some(value.clone());
    }

    debug!("updated report {id} to {new_status}");
    Ok(position)
}
