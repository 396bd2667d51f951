//! Built-in sample reports.
//!
//! Four representative intake records for demos and freshly provisioned
//! stores, loadable through the `seed` command.

use chrono::NaiveDate;

use crate::report::{Faculty, Report, ReportStatus};

/// Build a calendar date from known-valid components.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn sample(
    id: &str,
    reporter_name: &str,
    reporter_id: &str,
    faculty: Faculty,
    title: &str,
    description: &str,
    incident_date: NaiveDate,
    reported_at: NaiveDate,
    status: ReportStatus,
) -> Report {
    Report {
        id: id.to_string(),
        faculty,
        title: title.to_string(),
        description: description.to_string(),
        reporter_name: Some(reporter_name.to_string()),
        reporter_id: Some(reporter_id.to_string()),
        incident_date,
        reported_at,
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

/// The built-in sample reports.
#[must_use]
pub fn sample_reports() -> Vec<Report> {
    vec![
        sample(
            "REP-001",
            "Mahasiswa A",
            "09021182025001",
            Faculty::Fasilkom,
            "Pelecehan Verbal di Area Kantin",
            "Terjadi tindakan pelecehan verbal secara berulang oleh oknum \
             tertentu saat sedang makan siang.",
            ymd(2024, 3, 10),
            ymd(2024, 3, 11),
            ReportStatus::Unresolved,
        ),
        sample(
            "REP-002",
            "Mahasiswa B",
            "04011182126002",
            Faculty::Kedokteran,
            "Diskriminasi Gender dalam Kelompok Studi",
            "Dikeluarkan dari kelompok praktikum tanpa alasan yang jelas dan \
             mendapat perlakuan diskriminatif.",
            ymd(2024, 2, 15),
            ymd(2024, 2, 16),
            ReportStatus::InProgress,
        ),
        sample(
            "REP-003",
            "Mahasiswa C",
            "03031281924003",
            Faculty::Teknik,
            "Bullying di Organisasi Kemahasiswaan",
            "Mendapat tekanan psikis berlebihan saat kegiatan pengaderan \
             organisasi.",
            ymd(2024, 1, 20),
            ymd(2024, 1, 21),
            ReportStatus::Resolved,
        ),
        sample(
            "REP-004",
            "Mahasiswa D",
            "01011182025044",
            Faculty::Ekonomi,
            "Kekerasan Fisik Ringan",
            "Terjadi gesekan fisik saat antrian administrasi yang berujung \
             pada intimidasi.",
            ymd(2024, 3, 12),
            ymd(2024, 3, 13),
            ReportStatus::Unresolved,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reports_have_unique_ids() {
        let reports = sample_reports();
        for (i, a) in reports.iter().enumerate() {
            for b in &reports[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_sample_reports_shape() {
        let reports = sample_reports();
        assert_eq!(reports.len(), 4);
        for report in &reports {
            assert!(report.id.starts_with("REP-"));
            assert!(report.reporter_name.is_some());
            assert!(report.reported_at >= report.incident_date);
            assert!(report.victim_identities.is_none());
        }
    }

    #[test]
    fn test_sample_reports_cover_multiple_statuses() {
        let reports = sample_reports();
        assert!(reports.iter().any(|r| r.status == ReportStatus::Unresolved));
        assert!(reports.iter().any(|r| r.status == ReportStatus::InProgress));
        assert!(reports.iter().any(|r| r.status == ReportStatus::Resolved));
    }

    #[test]
    fn test_sample_reports_serialize() {
        let reports = sample_reports();
        let json = serde_json::to_string(&reports).unwrap();
        let back: Vec<Report> = serde_json::from_str(&json).unwrap();
        assert_eq!(reports, back);
    }
}
