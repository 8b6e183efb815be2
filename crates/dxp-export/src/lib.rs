//! DXP Export Library
//!
//! The shape of an ingestion-time analytics event plus the derivation
//! rules used to shape it for downstream analytics destinations.
//!
//! An [`EventRecord`] is plain data straight off the ingestion feed. At
//! export time a [`FieldDeriver`] is pointed at the record together with an
//! [`ExportDestination`]; its accessors compute the destination-aware
//! values (millisecond timestamps, joined tag strings, identity selection,
//! touch-data blocks) without ever mutating the record.
//!
//! # Example
//!
//! ```rust
//! use dxp_export::{EventRecord, ExportDestination, FieldDeriver};
//!
//! let record = EventRecord {
//!     name: Some("PURCHASE".to_string()),
//!     user_data_developer_identity: Some("318".to_string()),
//!     ..Default::default()
//! };
//!
//! let deriver = FieldDeriver::new(&record, ExportDestination::Mixpanel);
//! assert_eq!(deriver.user_id(), Some("318".to_string()));
//! ```

pub mod derive;
pub mod destination;
pub mod event;
pub mod template;

pub use derive::FieldDeriver;
pub use destination::{DestinationPolicy, ExportDestination, IdentityField, TouchDataPolicy};
pub use event::EventRecord;
pub use template::lower_cased;
