use crate::db::models::Medicine;

/// Observable state of a [`MedicineStore`](super::MedicineStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineStoreState {
    /// Ascending by name as the last successful fetch returned them, plus
    /// anything appended by inserts since.
    pub medicines: Vec<Medicine>,
    /// True only while a fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
}
