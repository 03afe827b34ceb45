pub mod discovery;
pub mod estimate;
pub mod insights;
pub mod parking;
pub mod session;
