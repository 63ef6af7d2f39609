pub mod inventory;
pub mod medicine;
