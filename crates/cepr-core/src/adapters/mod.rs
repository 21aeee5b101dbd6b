mod brasilapi;
mod viacep;

pub use brasilapi::BrasilApiAdapter;
pub use viacep::ViaCepAdapter;
