mod address;
mod postal_code;

pub use address::Address;
pub use postal_code::PostalCode;
