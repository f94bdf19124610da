// Adapters layer: concrete HTTP clients for the three remote services.

pub mod http;
