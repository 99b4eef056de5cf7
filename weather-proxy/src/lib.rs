//! HTTP proxy in front of the weather provider.
//!
//! The proxy is the only component that holds the provider API key. Clients
//! call its routes; it attaches the key, makes one outbound request, and relays
//! the provider's answer inside (or instead of) a small JSON envelope.
//!
//! ```text
//! GET /weather?city=<name>              envelope around current weather
//! GET /weather/coords?lat&lon&units     current weather body, relayed as-is
//! GET /forecast?lat&lon&units&cnt       forecast body, relayed as-is
//! GET /health
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
