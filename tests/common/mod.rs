//! Common test utilities for acqset integration tests
//!
//! Provides sample channel records and a populated settings value shared
//! across test files.

#![allow(dead_code)]

use acqset::{AcquisitionSettings, ChannelSpec};

// =============================================================================
// Sample Channels
// =============================================================================

/// A nuclear stain channel with a short exposure
pub fn dapi() -> ChannelSpec {
    ChannelSpec::new("DAPI", 25.0)
}

/// A green fluorescence channel with a longer exposure and Z offset
pub fn fitc() -> ChannelSpec {
    let mut channel = ChannelSpec::new("FITC", 50.0);
    channel.z_offset = 0.5;
    channel
}

// =============================================================================
// Sample Settings
// =============================================================================

/// A fully populated two-channel, three-slice time-lapse protocol
pub fn sample_settings() -> AcquisitionSettings {
    AcquisitionSettings::builder()
        .num_frames(3)
        .interval_ms(500.0)
        .channel_group("Fluorescence")
        .channels([dapi(), fitc()])
        .slices([0.0, 1.0, 2.0])
        .save_to("/data", "run1")
        .build()
}
