// crates/ledger/src/domain/value_objects/mod.rs

mod account_id;
mod amount;
mod owner_name;
mod transfer_id;

pub use account_id::AccountId;
pub use amount::Amount;
pub use owner_name::OwnerName;
pub use transfer_id::TransferId;
