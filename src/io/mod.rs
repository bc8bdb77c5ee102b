//! File I/O: building descriptions, scenarios and simulation output.

pub mod bim_json;
pub mod csv;
pub mod scenario;

pub use bim_json::{read_building, read_building_description, write_building_description};
pub use csv::{CsvSink, ShortCsvSink};
pub use scenario::read_scenario;
