//! API route handlers.

mod lookup;
mod status;

pub use lookup::{ip_info_handler, ipv4_handler, ipv6_handler, refresh_handler};
pub use status::status_handler;
