pub mod types;

pub use types::{BusinessEntity, Contact, ContactChannel, Signal};
