pub mod enums;
pub mod medication;
pub mod checkup;
pub mod hospital_data;

pub use enums::*;
pub use medication::*;
pub use checkup::*;
pub use hospital_data::*;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}
