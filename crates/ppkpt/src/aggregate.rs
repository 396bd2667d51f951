//! Derived dashboard views.
//!
//! Everything here is recomputed from the live collection on each call;
//! there is no cache and no incremental maintenance.

use chrono::NaiveDate;
use serde::Serialize;

use crate::report::{Faculty, Report, ReportStatus};

/// Milliseconds in one day.
const MS_PER_DAY: i64 = 86_400_000;

/// A report unresolved for at least this many days is overdue.
pub const OVERDUE_AFTER_DAYS: i64 = 25;

/// Per-status tallies over a report collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Reports still unresolved.
    pub unresolved: usize,

    /// Reports being followed up.
    pub in_progress: usize,

    /// Reports marked resolved.
    pub resolved: usize,

    /// Total number of reports.
    pub total: usize,
}

/// Number of reports attributed to one faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacultyCount {
    /// The faculty.
    pub faculty: Faculty,

    /// Reports attributed to it.
    pub count: usize,
}

/// Tally reports by status in a single pass.
#[must_use]
pub fn status_counts(reports: &[Report]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for report in reports {
        match report.status {
            ReportStatus::Unresolved => counts.unresolved += 1,
            ReportStatus::InProgress => counts.in_progress += 1,
            ReportStatus::Resolved => counts.resolved += 1,
        }
        counts.total += 1;
    }
    counts
}

/// Count reports per faculty, sorted by descending count.
///
/// Every faculty appears exactly once, including those with zero reports.
/// The sort is stable, so equal counts keep the fixed enumeration order.
#[must_use]
pub fn faculty_counts(reports: &[Report]) -> Vec<FacultyCount> {
    let mut counts: Vec<FacultyCount> = Faculty::ALL
        .iter()
        .map(|&faculty| FacultyCount {
            faculty,
            count: reports.iter().filter(|r| r.faculty == faculty).count(),
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Whole days elapsed between `reported_at` and `as_of`, rounded up.
///
/// Ceiling division of the absolute millisecond difference by
/// milliseconds-per-day; 0 when both fall on the same day.
#[must_use]
pub fn days_elapsed(reported_at: NaiveDate, as_of: NaiveDate) -> i64 {
    let millis = (as_of - reported_at).num_milliseconds().abs();
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    {
        (millis as u64).div_ceil(MS_PER_DAY as u64) as i64
    }
}

/// Whether a report has sat unresolved past the overdue threshold.
#[must_use]
pub fn is_overdue(report: &Report, as_of: NaiveDate) -> bool {
    report.status != ReportStatus::Resolved
        && days_elapsed(report.reported_at, as_of) >= OVERDUE_AFTER_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(faculty: Faculty, status: ReportStatus) -> Report {
        Report {
            id: format!("REP-{:06X}", rand::random::<u32>() & 0x00FF_FFFF),
            faculty,
            title: "t".to_string(),
            description: "d".to_string(),
            reporter_name: None,
            reporter_id: None,
            incident_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            reported_at: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            status,
            ai_assessment: None,
            evidence: None,
            victim_identities: None,
            witness_identities: None,
            investigation_process: None,
            sanction_recommendation: None,
            sanction_sk: None,
        }
    }

    #[test]
    fn test_status_counts_empty() {
        let counts = status_counts(&[]);
        assert_eq!(counts, StatusCounts::default());
    }

    #[test]
    fn test_status_counts_tallies() {
        let reports = vec![
            report(Faculty::Teknik, ReportStatus::Unresolved),
            report(Faculty::Hukum, ReportStatus::Unresolved),
            report(Faculty::Mipa, ReportStatus::InProgress),
            report(Faculty::Fkm, ReportStatus::Resolved),
        ];

        let counts = status_counts(&reports);
        assert_eq!(counts.unresolved, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.total, reports.len());
    }

    #[test]
    fn test_faculty_counts_covers_every_faculty() {
        let counts = faculty_counts(&[]);
        assert_eq!(counts.len(), Faculty::ALL.len());
        assert!(counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_faculty_counts_sums_to_total() {
        let reports = vec![
            report(Faculty::Teknik, ReportStatus::Unresolved),
            report(Faculty::Teknik, ReportStatus::Resolved),
            report(Faculty::Ekonomi, ReportStatus::Unresolved),
        ];

        let counts = faculty_counts(&reports);
        let sum: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(sum, reports.len());
    }

    #[test]
    fn test_faculty_counts_sorted_descending() {
        let reports = vec![
            report(Faculty::Fkm, ReportStatus::Unresolved),
            report(Faculty::Fkm, ReportStatus::Unresolved),
            report(Faculty::Teknik, ReportStatus::Unresolved),
        ];

        let counts = faculty_counts(&reports);
        assert_eq!(counts[0].faculty, Faculty::Fkm);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].faculty, Faculty::Teknik);
        for pair in counts.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_faculty_counts_ties_keep_enumeration_order() {
        // Every faculty has zero reports, so the order must be exactly
        // the fixed enumeration order.
        let counts = faculty_counts(&[]);
        let order: Vec<Faculty> = counts.iter().map(|c| c.faculty).collect();
        assert_eq!(order, Faculty::ALL.to_vec());
    }

    #[test]
    fn test_days_elapsed_same_day_is_zero() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(days_elapsed(day, day), 0);
    }

    #[test]
    fn test_days_elapsed_counts_whole_days() {
        let reported = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(days_elapsed(reported, later), 10);
    }

    #[test]
    fn test_days_elapsed_is_monotonic() {
        let reported = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut previous = 0;
        for offset in 0..40 {
            let as_of = reported + chrono::Duration::days(offset);
            let elapsed = days_elapsed(reported, as_of);
            assert!(elapsed >= previous);
            previous = elapsed;
        }
    }

    #[test]
    fn test_days_elapsed_is_absolute() {
        let reported = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(days_elapsed(reported, earlier), 5);
    }

    #[test]
    fn test_is_overdue_at_threshold() {
        let mut r = report(Faculty::Teknik, ReportStatus::Unresolved);
        r.reported_at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let just_before = r.reported_at + chrono::Duration::days(OVERDUE_AFTER_DAYS - 1);
        let at_threshold = r.reported_at + chrono::Duration::days(OVERDUE_AFTER_DAYS);

        assert!(!is_overdue(&r, just_before));
        assert!(is_overdue(&r, at_threshold));
    }

    #[test]
    fn test_is_overdue_never_for_resolved() {
        let mut r = report(Faculty::Teknik, ReportStatus::Resolved);
        r.reported_at = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let much_later = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!is_overdue(&r, much_later));
    }
}
