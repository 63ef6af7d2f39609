use crate::{
    db::models::NewMedicine,
    store::{MedicineStore, MedicineTable},
    utils::stock_label,
};

/// Inserts `draft` through the store and renders a confirmation line.
pub async fn add_medicine<T: MedicineTable>(
    store: &MedicineStore<T>,
    draft: NewMedicine,
) -> Result<String, T::Error> {
    let medicine = store.add_medicine(draft).await.map_err(|e| {
        log::error!("Failed to add medicine: {}", e);
        e
    })?;

    Ok(format!(
        "Added {} at {} ({}), id {}",
        medicine.name,
        medicine.location,
        stock_label(medicine.is_in_stock),
        medicine.id
    ))
}
