//! Channel configuration record
//!
//! A [`ChannelSpec`] describes one imaging channel of an acquisition: which
//! configuration preset to apply, the exposure to use, and how the channel
//! participates in Z-stacks and frame skipping. The record is owned by the
//! channel-configuration subsystem; the settings codec treats it as an
//! opaque nested record and passes it through serde unchanged.

use serde::{Deserialize, Serialize};

/// Settings for a single imaging channel.
///
/// Entries are held by [`AcquisitionSettings::channels`] behind an `Arc`,
/// so copies of a settings value share the same channel records.
///
/// [`AcquisitionSettings::channels`]: crate::AcquisitionSettings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelSpec {
    /// Name of the configuration preset within the channel group
    pub config: String,

    /// Exposure time in milliseconds
    pub exposure: f64,

    /// Z offset applied while imaging this channel, in micrometers
    pub z_offset: f64,

    /// Whether this channel is imaged at every slice of a Z-stack
    pub do_z_stack: bool,

    /// Acquire this channel only every (n + 1)-th frame
    pub skip_factor_frame: u32,

    /// Whether this channel participates in the acquisition at all
    pub use_channel: bool,

    /// Camera device to use for this channel; empty means the default camera
    pub camera: String,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            config: String::new(),
            exposure: 10.0,
            z_offset: 0.0,
            do_z_stack: true,
            skip_factor_frame: 0,
            use_channel: true,
            camera: String::new(),
        }
    }
}

impl ChannelSpec {
    /// Create a channel for the given configuration preset with an exposure.
    ///
    /// Remaining fields take their defaults and can be set directly.
    pub fn new(config: impl Into<String>, exposure: f64) -> Self {
        Self {
            config: config.into(),
            exposure,
            ..Default::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
