pub mod devices;
pub mod tone;
