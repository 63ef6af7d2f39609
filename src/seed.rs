use futures::future;
use medstock::{
    config::{Backend, Config},
    db::{init_db, PgMedicineTable},
    remote::RestMedicineTable,
    MedicineStore, MedicineTable, NewMedicine,
};

type Error = Box<dyn std::error::Error + Send + Sync>;

fn get_seed_data() -> Vec<NewMedicine> {
    vec![
        NewMedicine::new("Amoxicillin", "Shelf A1", true),
        NewMedicine::new("Aspirin", "Shelf A2", true),
        NewMedicine::new("Atorvastatin", "Shelf B1", true),
        NewMedicine::new("Cetirizine", "Shelf B2", false),
        NewMedicine::new("Ibuprofen", "Shelf C1", true),
        NewMedicine::new("Lisinopril", "Shelf C2", true),
        NewMedicine::new("Metformin", "Fridge 1", false),
        NewMedicine::new("Metoprolol", "Shelf D1", true),
        NewMedicine::new("Omeprazole", "Shelf D2", true),
        NewMedicine::new("Paracetamol", "Counter", true),
    ]
}

/// Inserts every seed medicine concurrently and returns how many made it.
async fn seed_medicines<T: MedicineTable>(store: &MedicineStore<T>) -> usize {
    let inserts = get_seed_data()
        .into_iter()
        .map(|draft| store.add_medicine(draft));

    let results = future::join_all(inserts).await;

    let mut inserted = 0;
    for result in results {
        match result {
            Ok(_) => inserted += 1,
            Err(e) => log::error!("Failed to seed medicine: {}", e),
        }
    }
    inserted
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::load()?;
    let inserted = match config.backend()? {
        Backend::Rest { url, anon_key } => {
            seed_medicines(&MedicineStore::new(RestMedicineTable::new(url, anon_key))).await
        }
        Backend::Postgres { database_url } => {
            let pool = init_db(&database_url).await?;
            seed_medicines(&MedicineStore::new(PgMedicineTable::new(pool))).await
        }
    };

    log::info!("Seeded {} medicines", inserted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medstock::Medicine;

    #[derive(Debug, thiserror::Error)]
    #[error("{0} was rejected")]
    struct Rejected(String);

    /// Accepts every draft except the one named `reject`.
    struct RejectingTable {
        reject: &'static str,
    }

    #[async_trait]
    impl MedicineTable for RejectingTable {
        type Error = Rejected;

        async fn list_medicines_ordered_by_name(&self) -> Result<Vec<Medicine>, Self::Error> {
            Ok(vec![])
        }

        async fn insert_medicine(&self, draft: &NewMedicine) -> Result<Medicine, Self::Error> {
            if draft.name == self.reject {
                return Err(Rejected(draft.name.clone()));
            }
            Ok(Medicine {
                id: draft.name.to_lowercase(),
                name: draft.name.clone(),
                location: draft.location.clone(),
                is_in_stock: draft.is_in_stock,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn seeding_continues_past_failed_inserts() {
        let store = MedicineStore::new(RejectingTable { reject: "Cetirizine" });

        let inserted = seed_medicines(&store).await;

        assert_eq!(inserted, get_seed_data().len() - 1);
        let names: Vec<String> = store
            .state()
            .medicines
            .into_iter()
            .map(|medicine| medicine.name)
            .collect();
        assert_eq!(names.len(), inserted);
        assert!(!names.contains(&"Cetirizine".to_string()));
        assert!(names.contains(&"Paracetamol".to_string()));
    }
}
