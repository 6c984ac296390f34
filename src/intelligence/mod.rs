pub mod checkup;
pub mod prediction_client;
pub mod readmission;

pub use checkup::*;
pub use prediction_client::*;
pub use readmission::*;
