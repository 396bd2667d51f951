//! The report store.
//!
//! Owns the live report collection and the admin session flag, loading
//! both from the slot store once at startup and serializing the whole
//! collection back after every mutation.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::auth;
use crate::error::Result;
use crate::lifecycle;
use crate::report::{AdminUpdate, Report, ReportDraft, ReportStatus};
use crate::storage::{SlotStore, AUTH_SLOT, REPORTS_SLOT};

/// Serialized auth-flag value meaning "logged in".
const AUTH_FLAG: &str = "true";

/// The live report collection plus its persisted snapshot.
#[derive(Debug)]
pub struct ReportStore<S: SlotStore> {
    /// Backing slot store.
    slots: S,
    /// Reports, newest first.
    reports: Vec<Report>,
    /// Whether the admin session flag is set.
    authenticated: bool,
}

impl<S: SlotStore> ReportStore<S> {
    /// Open a store over `slots`, loading both snapshot slots.
    ///
    /// A malformed report snapshot fails closed: the parse error is logged
    /// and the store starts with an empty collection. An absent slot also
    /// starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a slot exists but cannot be read.
    pub fn open(slots: S) -> Result<Self> {
        let reports = match slots.get(REPORTS_SLOT)? {
            Some(raw) => match serde_json::from_str::<Vec<Report>>(&raw) {
                Ok(reports) => reports,
                Err(err) => {
                    warn!("discarding malformed report snapshot: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let authenticated = matches!(slots.get(AUTH_SLOT)?.as_deref(), Some(AUTH_FLAG));

        info!("loaded {} reports", reports.len());
        Ok(Self {
            slots,
            reports,
            authenticated,
        })
    }

    /// The current collection, newest first.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Number of reports in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Look up a report by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Submit a new report, prepending it to the collection and persisting
    /// the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn submit(&mut self, draft: ReportDraft) -> Result<&Report> {
        let report = lifecycle::submit(draft, &self.reports, Utc::now().date_naive());
        self.reports.insert(0, report);
        self.persist()?;
        Ok(&self.reports[0])
    }

    /// Update the status and admin fields of the report with `id`,
    /// persisting the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ReportNotFound`] if no report has the given
    /// id (the collection is unchanged), or an error if the snapshot
    /// cannot be written.
    pub fn update(
        &mut self,
        id: &str,
        new_status: ReportStatus,
        fields: &AdminUpdate,
    ) -> Result<&Report> {
        let position = lifecycle::update(&mut self.reports, id, new_status, fields)?;
        self.persist()?;
        Ok(&self.reports[position])
    }

    /// Replace the whole collection and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn replace_all(&mut self, reports: Vec<Report>) -> Result<()> {
        self.reports = reports;
        self.persist()
    }

    /// Attempt an admin login, persisting the session flag on success.
    ///
    /// Returns whether the credentials matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the session flag cannot be written.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if !auth::verify(username, password) {
            return Ok(false);
        }
        self.authenticated = true;
        self.slots.set(AUTH_SLOT, AUTH_FLAG)?;
        info!("admin session opened");
        Ok(true)
    }

    /// Close the admin session and clear the persisted flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the session flag cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.authenticated = false;
        self.slots.remove(AUTH_SLOT)?;
        info!("admin session closed");
        Ok(())
    }

    /// Whether the admin session flag is set.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Serialize the whole collection into its slot.
    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.reports)?;
        self.slots.set(REPORTS_SLOT, &raw)?;
        debug!("persisted {} reports", self.reports.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Faculty;
    use crate::storage::MemorySlotStore;
    use chrono::NaiveDate;

    fn create_test_store() -> ReportStore<MemorySlotStore> {
        ReportStore::open(MemorySlotStore::new()).expect("failed to create test store")
    }

    fn test_draft(title: &str, faculty: Faculty) -> ReportDraft {
        ReportDraft {
            title: title.to_string(),
            description: "Kronologi kejadian.".to_string(),
            faculty,
            incident_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            reporter_name: Some("Mahasiswa A".to_string()),
            reporter_id: Some("09021182025001".to_string()),
            anonymous: false,
            evidence: None,
        }
    }

    #[test]
    fn test_open_empty() {
        let store = create_test_store();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_submit_prepends() {
        let mut store = create_test_store();

        let first = store
            .submit(test_draft("Pertama", Faculty::Teknik))
            .unwrap()
            .id
            .clone();
        let second = store
            .submit(test_draft("Kedua", Faculty::Hukum))
            .unwrap()
            .id
            .clone();

        assert_eq!(store.len(), 2);
        // Newest first.
        assert_eq!(store.reports()[0].id, second);
        assert_eq!(store.reports()[1].id, first);
    }

    #[test]
    fn test_submit_sets_reported_at_today() {
        let mut store = create_test_store();
        let report = store.submit(test_draft("t", Faculty::Mipa)).unwrap();
        assert_eq!(report.reported_at, Utc::now().date_naive());
        assert_eq!(report.status, ReportStatus::Unresolved);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = create_test_store();
        store.submit(test_draft("Pertama", Faculty::Teknik)).unwrap();
        store.submit(test_draft("Kedua", Faculty::Fkm)).unwrap();
        let reports = store.reports().to_vec();

        let ReportStore { slots, .. } = store;
        let reopened = ReportStore::open(slots).unwrap();

        assert_eq!(reopened.reports(), reports.as_slice());
    }

    #[test]
    fn test_malformed_snapshot_fails_closed() {
        let slots = MemorySlotStore::with_slot(REPORTS_SLOT, "{definitely not an array");
        let store = ReportStore::open(slots).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_persists() {
        let mut store = create_test_store();
        let id = store
            .submit(test_draft("t", Faculty::Teknik))
            .unwrap()
            .id
            .clone();

        store
            .update(&id, ReportStatus::Resolved, &AdminUpdate::default())
            .unwrap();

        let ReportStore { slots, .. } = store;
        let reopened = ReportStore::open(slots).unwrap();
        assert_eq!(reopened.get(&id).unwrap().status, ReportStatus::Resolved);
    }

    #[test]
    fn test_update_unknown_id_leaves_collection_unchanged() {
        let mut store = create_test_store();
        store.submit(test_draft("t", Faculty::Teknik)).unwrap();
        let snapshot = store.reports().to_vec();

        let err = store
            .update("REP-MISSING", ReportStatus::Resolved, &AdminUpdate::default())
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.reports(), snapshot.as_slice());
    }

    #[test]
    fn test_get() {
        let mut store = create_test_store();
        let id = store
            .submit(test_draft("t", Faculty::Hukum))
            .unwrap()
            .id
            .clone();

        assert!(store.get(&id).is_some());
        assert!(store.get("REP-MISSING").is_none());
    }

    #[test]
    fn test_login_logout() {
        let mut store = create_test_store();

        assert!(!store.login("admin", "wrong").unwrap());
        assert!(!store.is_authenticated());

        assert!(store.login("admin", "123456").unwrap());
        assert!(store.is_authenticated());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_auth_flag_survives_reopen() {
        let mut store = create_test_store();
        store.login("admin", "123456").unwrap();

        let ReportStore { slots, .. } = store;
        let reopened = ReportStore::open(slots).unwrap();
        assert!(reopened.is_authenticated());
    }

    #[test]
    fn test_replace_all() {
        let mut store = create_test_store();
        store.submit(test_draft("old", Faculty::Teknik)).unwrap();

        store.replace_all(Vec::new()).unwrap();
        assert!(store.is_empty());

        let ReportStore { slots, .. } = store;
        let reopened = ReportStore::open(slots).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_dashboard_scenario() {
        use crate::aggregate::{faculty_counts, status_counts};

        let mut store = create_test_store();
        let id = store
            .submit(test_draft("Bullying", Faculty::Teknik))
            .unwrap()
            .id
            .clone();

        let counts = faculty_counts(store.reports());
        let teknik = counts
            .iter()
            .find(|c| c.faculty == Faculty::Teknik)
            .unwrap();
        assert_eq!(teknik.count, 1);
        assert_eq!(status_counts(store.reports()).unresolved, 1);

        store
            .update(&id, ReportStatus::Resolved, &AdminUpdate::default())
            .unwrap();
        let counts = status_counts(store.reports());
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.unresolved, 0);

        let snapshot = store.reports().to_vec();
        let err = store
            .update("nonexistent", ReportStatus::Resolved, &AdminUpdate::default())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.reports(), snapshot.as_slice());
    }
}
