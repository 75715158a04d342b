pub mod capacity_ledger;
pub mod warehouse;
