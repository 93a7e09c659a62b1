pub mod booking;
pub mod email_address;
pub mod inquiry;
pub mod validate;
