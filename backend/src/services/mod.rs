//! Business logic services for the crop advisory backend

pub mod advisory;
pub mod records;

pub use advisory::AdvisoryService;
pub use records::FarmRecordService;
