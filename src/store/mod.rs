use async_trait::async_trait;
use tokio::sync::watch;

use crate::db::models::{Medicine, NewMedicine};

mod state;

pub use state::MedicineStoreState;

/// The remote `medicines` table, reduced to the two requests the store makes.
#[async_trait]
pub trait MedicineTable: Send + Sync {
    /// Failure reported by the table. Its `Display` output is the message
    /// recorded in [`MedicineStoreState::error`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Selects every row, ordered ascending by `name`.
    async fn list_medicines_ordered_by_name(&self) -> Result<Vec<Medicine>, Self::Error>;

    /// Inserts one row and returns it as stored, with `id` and `created_at` filled in.
    async fn insert_medicine(&self, draft: &NewMedicine) -> Result<Medicine, Self::Error>;
}

/// Holds the medicines list and publishes every change to subscribers.
///
/// Each operation awaits the table exactly once and applies its result in a
/// single synchronous step afterwards. Overlapping calls are not sequenced:
/// whichever response arrives last decides the final list.
pub struct MedicineStore<T> {
    table: T,
    state: watch::Sender<MedicineStoreState>,
}

impl<T: MedicineTable> MedicineStore<T> {
    pub fn new(table: T) -> Self {
        let (state, _) = watch::channel(MedicineStoreState::default());
        Self { table, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> MedicineStoreState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<MedicineStoreState> {
        self.state.subscribe()
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Reloads the whole list from the table.
    ///
    /// On success the list is replaced wholesale. On failure the message is
    /// kept in `error` and the previous list stays in place. A success does
    /// not clear an error left by an earlier failure. Failures are never
    /// returned to the caller. Dropping the future before the table answers
    /// resets `loading` and leaves everything else untouched.
    pub async fn fetch_medicines(&self) {
        log::debug!("Fetching medicines");
        let loading = LoadingGuard::start(&self.state);

        let result = self.table.list_medicines_ordered_by_name().await;

        loading.finish(|state| match result {
            Ok(medicines) => {
                log::info!("Fetched {} medicines", medicines.len());
                state.medicines = medicines;
            }
            Err(e) => {
                log::error!("Failed to fetch medicines: {}", e);
                state.error = Some(e.to_string());
            }
        });
    }

    /// Inserts `draft` and appends the stored row to the end of the list.
    ///
    /// The list is not re-sorted, so a name that sorts earlier than the last
    /// entry breaks the by-name order until the next fetch. `loading` is left
    /// alone. On failure the table's error is returned untouched and the
    /// state does not change.
    pub async fn add_medicine(&self, draft: NewMedicine) -> Result<Medicine, T::Error> {
        log::debug!("Adding medicine {}", draft.name);
        let medicine = self.table.insert_medicine(&draft).await?;

        log::info!("Added medicine {} with id {}", medicine.name, medicine.id);
        self.state
            .send_modify(|state| state.medicines.push(medicine.clone()));

        Ok(medicine)
    }
}

/// Holds `loading` up for one fetch.
///
/// `finish` applies the result and clears the flag in one transition; if the
/// guard is dropped unfinished the flag is cleared on its own.
struct LoadingGuard<'a> {
    state: Option<&'a watch::Sender<MedicineStoreState>>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<MedicineStoreState>) -> Self {
        state.send_modify(|state| state.loading = true);
        Self { state: Some(state) }
    }

    fn finish(mut self, apply: impl FnOnce(&mut MedicineStoreState)) {
        if let Some(state) = self.state.take() {
            state.send_modify(|state| {
                apply(state);
                state.loading = false;
            });
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            log::debug!("Fetch dropped before completion");
            state.send_modify(|state| state.loading = false);
        }
    }
}
