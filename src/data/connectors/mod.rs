mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{InputColumn, Order, TableKind};
pub use validator::DataValidator;
