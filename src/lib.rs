//! # acqset - Acquisition Protocol Settings
//!
//! A small library defining the settings value for a single
//! time-lapse/multi-dimensional acquisition run on an instrument-control
//! system, together with its versioned JSON codec and file persistence.
//!
//! ## Features
//!
//! - **Data Model**: [`AcquisitionSettings`] covers timing, channels,
//!   Z-slices, loop ordering, shutter/autofocus policy, and persistence
//!   options, with documented defaults and a fluent builder
//! - **Independent Copies**: [`AcquisitionSettings::copy`] rebuilds every
//!   container so a copy can be edited (or handed to a running engine)
//!   without touching the original; channel entries stay shared
//! - **Versioned Codec**: [`to_json`]/[`from_json`] map every field
//!   explicitly, stamp the payload with [`FORMAT_VERSION`], tolerate
//!   missing and unknown keys, and reject malformed input atomically
//! - **File Persistence**: [`storage`] reads and atomically writes
//!   protocol files on top of the codec
//!
//! The settings value is pure data: it performs no validation of physical
//! feasibility and no hardware interaction. The acquisition engine that
//! executes a protocol, and the channel-configuration subsystem behind
//! [`ChannelSpec`], are separate components.
//!
//! ## Quick Start
//!
//! ```rust
//! use acqset::{AcquisitionSettings, ChannelSpec};
//!
//! let settings = AcquisitionSettings::builder()
//!     .num_frames(3)
//!     .interval_ms(500.0)
//!     .channel_group("Fluorescence")
//!     .channels([ChannelSpec::new("DAPI", 25.0), ChannelSpec::new("FITC", 50.0)])
//!     .slices([0.0, 1.0, 2.0])
//!     .save_to("/data", "run1")
//!     .build();
//!
//! // Hand an independent copy to the engine; keep editing the original.
//! let for_engine = settings.copy();
//!
//! // Round-trip through the versioned JSON format.
//! let text = acqset::to_json(&for_engine)?;
//! let restored = acqset::from_json(&text)?;
//! assert_eq!(restored, for_engine);
//! # Ok::<(), acqset::Error>(())
//! ```

// Core modules
mod channel;
mod codec;
mod error;
mod settings;
pub mod storage;

// Re-exports from core
pub use channel::ChannelSpec;
pub use codec::{FORMAT_VERSION, from_json, to_json};
pub use error::{Error, Result};
pub use settings::{AcquisitionSettings, AcquisitionSettingsBuilder};
