pub mod math;
pub mod secrets;
pub mod time;
