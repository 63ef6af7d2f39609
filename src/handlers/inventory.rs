use crate::{
    store::{MedicineStore, MedicineTable},
    utils::{format_created_at, stock_label},
};

/// Refreshes the store and renders the inventory as text.
///
/// The store keeps the message of an earlier failed fetch around, so only an
/// error that changed during this refresh is reported. A repeat of the same
/// message falls through to the list still held by the store.
pub async fn list_inventory<T: MedicineTable>(store: &MedicineStore<T>) -> String {
    log::info!("Listing inventory");
    let previous_error = store.state().error;
    store.fetch_medicines().await;

    let state = store.state();
    if let Some(error) = state.error.filter(|error| previous_error.as_ref() != Some(error)) {
        return format!("Failed to load medicines: {}", error);
    }

    if state.medicines.is_empty() {
        return "No medicines found in the inventory".to_string();
    }

    let message = state
        .medicines
        .iter()
        .map(|medicine| {
            format!(
                "🏥 {}\n   Location: {}\n   Status: {}\n   Added: {}",
                medicine.name,
                medicine.location,
                stock_label(medicine.is_in_stock),
                format_created_at(&medicine.created_at)
            )
        })
        .collect::<Vec<String>>()
        .join("\n\n");

    format!("Available medicines:\n\n{}", message)
}
