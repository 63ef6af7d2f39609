//! Client-side store for a remote `medicines` table.
//!
//! [`store::MedicineStore`] keeps the fetched rows together with a loading
//! flag and the last fetch error, and publishes every change through a
//! `tokio::sync::watch` channel. The table itself sits behind
//! [`store::MedicineTable`], implemented over the hosted REST API
//! ([`remote::RestMedicineTable`]) and over Postgres directly
//! ([`db::PgMedicineTable`]).

pub mod config;
pub mod db;
pub mod handlers;
pub mod remote;
pub mod store;
pub mod utils;

pub use db::models::{Medicine, NewMedicine};
pub use store::{MedicineStore, MedicineStoreState, MedicineTable};
