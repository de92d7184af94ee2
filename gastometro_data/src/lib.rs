mod amount;
mod client;
mod errors;
pub mod types;
pub use self::amount::{parse_amount, Amount};
pub use self::client::{Client, LEGISLATORS_DOCUMENT, RANKINGS_DOCUMENT};
pub use self::errors::Error;
