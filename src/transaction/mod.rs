pub mod model;

pub use model::{Sender, Transaction};
