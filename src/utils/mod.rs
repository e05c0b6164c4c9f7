//! Request helpers shared by HTTP handlers.
//!
//! - [`client_ip`] - Origin address resolution from proxy headers

pub mod client_ip;
