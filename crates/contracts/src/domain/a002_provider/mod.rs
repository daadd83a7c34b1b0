pub mod aggregate;

pub use aggregate::{is_valid_cuit, normalize_cuit, Provider, ProviderDto};
