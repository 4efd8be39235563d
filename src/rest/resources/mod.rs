//! EasyPost resource implementations.
//!
//! Each resource implements [`RestResource`](crate::rest::RestResource) and
//! adds its own instance actions:
//!
//! | Resource | Actions |
//! |----------|---------|
//! | [`Pickup`] | `buy`, `cancel`, `lowest_rate` |
//! | [`Address`] | `create_and_verify`, `verify` |
//! | [`CarrierAccount`] | `update`, `delete` |
//! | [`Rate`] | find only |
//! | [`Shipment`] | `buy`, `regenerate_rates`, `refund`, `insure`, `lowest_rate` |
//! | [`Batch`] | `add_shipments`, `remove_shipments`, `buy`, `label`, `create_scan_form` |
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::RestResource;
//! use easypost::rest::resources::{ListParams, Pickup};
//!
//! let page = Pickup::all(&client, Some(ListParams {
//!     page_size: Some(20),
//!     ..Default::default()
//! }))?;
//!
//! for pickup in page.iter() {
//!     println!("{:?} {:?}", pickup.id, pickup.status);
//! }
//! ```

mod address;
mod batch;
mod carrier_account;
mod common;
mod pickup;
mod rate;
mod shipment;

pub use address::{Address, Verification, Verifications};
pub use batch::{Batch, BatchCreateParams, BatchShipment, BatchState, ScanForm};
pub use carrier_account::{CarrierAccount, CarrierAccountParams};
pub use common::{FieldError, ListParams, ObjectRef};
pub use pickup::{Pickup, PickupCreateParams, PickupStatus};
pub use rate::{lowest_rate, Rate};
pub use shipment::{
    Parcel, PostageLabel, Shipment, ShipmentCreateParams, ShipmentListParams, ShipmentMessage,
};
