//! Hotel-wide configuration singleton.

use serde::{Deserialize, Serialize};

/// Property details and the tax rate applied to receipts.
///
/// Every field defaults, so a store that was never initialized reads back
/// as an empty-shaped config with a zero tax rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelConfig {
    /// Property name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Front-desk phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Tax as a fraction of the subtotal (e.g. `0.12`).
    pub tax_rate: f64,
}
