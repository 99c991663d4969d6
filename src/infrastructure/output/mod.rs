pub mod tables;
pub mod csv_generator;
pub mod json_generator;

pub use csv_generator::CsvGenerator;
pub use json_generator::JsonGenerator;
