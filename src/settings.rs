//! Acquisition protocol data model
//!
//! [`AcquisitionSettings`] holds every parameter describing a single
//! time-lapse/multi-dimensional acquisition run: frame count and timing,
//! channels, Z-slices, loop ordering, shutter and autofocus policy, and
//! persistence options. The value is inert data: an owner (typically a
//! protocol editor) mutates it freely and then hands it to the acquisition
//! engine, taking a [`copy()`](AcquisitionSettings::copy) first if the
//! original will keep being edited while the engine runs. The type carries
//! no locking of its own; concurrent mutation of one instance must be
//! synchronized by the caller.

use std::sync::Arc;

use crate::channel::ChannelSpec;

/// Parameters for a single acquisition run.
///
/// A freshly constructed value describes the simplest possible protocol
/// (one frame, no channels, no slices, nothing saved). Every field is
/// public and freely editable; no combination of values is rejected here.
/// Consistency (for example `use_custom_intervals` implying a populated
/// `custom_intervals_ms` of matching length) is the consumer's
/// responsibility.
#[derive(Debug, PartialEq)]
pub struct AcquisitionSettings {
    // -------------------------------------------------------------------------
    // Timing
    // -------------------------------------------------------------------------
    /// Number of time points to acquire
    pub num_frames: u32,

    /// Nominal delay between frames in milliseconds; ignored when custom
    /// intervals are in use
    pub interval_ms: f64,

    /// Use per-frame delays from `custom_intervals_ms` instead of the
    /// uniform `interval_ms`. Do not set this without populating
    /// `custom_intervals_ms`.
    pub use_custom_intervals: bool,

    /// Per-frame delays in milliseconds; `None` means uniform timing
    pub custom_intervals_ms: Option<Vec<f64>>,

    // -------------------------------------------------------------------------
    // Channels and Z
    // -------------------------------------------------------------------------
    /// Channels to acquire, in acquisition order. Entries are shared
    /// between copies of a settings value (see [`copy()`](Self::copy)).
    pub channels: Vec<Arc<ChannelSpec>>,

    /// Configuration group the channels are drawn from; empty means none
    pub channel_group: String,

    /// Z positions to visit per time point/channel
    pub slices: Vec<f64>,

    /// Whether `slices` are offsets from `z_reference` rather than
    /// absolute stage positions
    pub relative_z_slice: bool,

    /// Reference Z position for relative slices
    pub z_reference: f64,

    // -------------------------------------------------------------------------
    // Ordering and shutter policy
    // -------------------------------------------------------------------------
    /// Slice coordinate changes before channel coordinate
    pub slices_first: bool,

    /// Frame coordinate changes before position coordinate
    pub time_first: bool,

    /// Keep the shutter open across slice transitions
    pub keep_shutter_open_slices: bool,

    /// Keep the shutter open across channel transitions
    pub keep_shutter_open_channels: bool,

    // -------------------------------------------------------------------------
    // Autofocus
    // -------------------------------------------------------------------------
    /// Run autofocus before each eligible step
    pub use_autofocus: bool,

    /// Number of eligible autofocus opportunities to skip between runs;
    /// 0 runs every time
    pub skip_autofocus_count: u32,

    // -------------------------------------------------------------------------
    // Persistence and display
    // -------------------------------------------------------------------------
    /// Write acquired images to storage
    pub save: bool,

    /// Root directory for output; meaningful only when `save` is set
    pub root: Option<String>,

    /// Run name, used as the output sub-directory
    pub prefix: Option<String>,

    /// Free-text annotation
    pub comment: String,

    /// Iterate an externally supplied multi-position list
    pub use_position_list: bool,

    /// Minimum wait in milliseconds before declaring a camera-sequence
    /// timeout; the applied timeout also accounts for exposure time
    pub camera_timeout: u32,

    /// Route acquired images to a live display
    pub should_display_images: bool,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            num_frames: 1,
            interval_ms: 0.0,
            use_custom_intervals: false,
            custom_intervals_ms: None,
            channels: Vec::new(),
            channel_group: String::new(),
            slices: Vec::new(),
            relative_z_slice: false,
            z_reference: 0.0,
            slices_first: false,
            time_first: false,
            keep_shutter_open_slices: false,
            keep_shutter_open_channels: false,
            use_autofocus: false,
            skip_autofocus_count: 0,
            save: false,
            root: None,
            prefix: None,
            comment: String::new(),
            use_position_list: false,
            camera_timeout: 20_000,
            should_display_images: true,
        }
    }
}

impl AcquisitionSettings {
    /// Create settings with the documented defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for assembling settings fluently
    ///
    /// # Example
    /// ```rust
    /// use acqset::AcquisitionSettings;
    ///
    /// let settings = AcquisitionSettings::builder()
    ///     .num_frames(10)
    ///     .interval_ms(250.0)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> AcquisitionSettingsBuilder {
        AcquisitionSettingsBuilder::new()
    }

    /// Return an independent copy of these settings.
    ///
    /// Container fields (`channels`, `slices`, `custom_intervals_ms`) are
    /// rebuilt, so adding, removing, or reordering elements on the copy
    /// never affects the original and vice versa. Channel entries
    /// themselves are shared (`Arc`), not duplicated; an absent
    /// `custom_intervals_ms` stays absent in the copy. Scalars are copied
    /// by value.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            num_frames: self.num_frames,
            interval_ms: self.interval_ms,
            use_custom_intervals: self.use_custom_intervals,
            custom_intervals_ms: self.custom_intervals_ms.as_ref().map(|v| v.to_vec()),
            channels: self.channels.iter().map(Arc::clone).collect(),
            channel_group: self.channel_group.clone(),
            slices: self.slices.to_vec(),
            relative_z_slice: self.relative_z_slice,
            z_reference: self.z_reference,
            slices_first: self.slices_first,
            time_first: self.time_first,
            keep_shutter_open_slices: self.keep_shutter_open_slices,
            keep_shutter_open_channels: self.keep_shutter_open_channels,
            use_autofocus: self.use_autofocus,
            skip_autofocus_count: self.skip_autofocus_count,
            save: self.save,
            root: self.root.clone(),
            prefix: self.prefix.clone(),
            comment: self.comment.clone(),
            use_position_list: self.use_position_list,
            camera_timeout: self.camera_timeout,
            should_display_images: self.should_display_images,
        }
    }
}

impl Clone for AcquisitionSettings {
    fn clone(&self) -> Self {
        self.copy()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`AcquisitionSettings`] with a fluent API
///
/// Starts from the documented defaults; every method overrides one aspect
/// of the protocol. Coupled fields are set together: enabling custom
/// intervals, relative Z, autofocus, or saving also sets the companion
/// flag.
///
/// # Example
/// ```rust
/// use acqset::{AcquisitionSettings, ChannelSpec};
///
/// let settings = AcquisitionSettings::builder()
///     .num_frames(3)
///     .interval_ms(500.0)
///     .channel_group("Fluorescence")
///     .channels([ChannelSpec::new("DAPI", 25.0), ChannelSpec::new("FITC", 50.0)])
///     .slices([0.0, 1.0, 2.0])
///     .save_to("/data", "run1")
///     .build();
///
/// assert_eq!(settings.channels.len(), 2);
/// assert!(settings.save);
/// ```
#[derive(Debug, Default)]
pub struct AcquisitionSettingsBuilder {
    settings: AcquisitionSettings,
}

impl AcquisitionSettingsBuilder {
    /// Create a builder holding the default protocol
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: AcquisitionSettings::default(),
        }
    }

    /// Set the number of time points
    #[must_use]
    pub fn num_frames(mut self, frames: u32) -> Self {
        self.settings.num_frames = frames;
        self
    }

    /// Set the uniform delay between frames in milliseconds
    #[must_use]
    pub fn interval_ms(mut self, interval: f64) -> Self {
        self.settings.interval_ms = interval;
        self
    }

    /// Use per-frame delays instead of a uniform interval
    ///
    /// Also sets `use_custom_intervals`. The sequence length should match
    /// the frame count; that consistency is not checked here.
    #[must_use]
    pub fn custom_intervals_ms(mut self, intervals: impl Into<Vec<f64>>) -> Self {
        self.settings.custom_intervals_ms = Some(intervals.into());
        self.settings.use_custom_intervals = true;
        self
    }

    /// Set the configuration group channels are drawn from
    #[must_use]
    pub fn channel_group(mut self, group: impl Into<String>) -> Self {
        self.settings.channel_group = group.into();
        self
    }

    /// Replace the channel sequence; order is acquisition order
    #[must_use]
    pub fn channels(mut self, channels: impl IntoIterator<Item = ChannelSpec>) -> Self {
        self.settings.channels = channels.into_iter().map(Arc::new).collect();
        self
    }

    /// Append one channel to the sequence
    #[must_use]
    pub fn add_channel(mut self, channel: ChannelSpec) -> Self {
        self.settings.channels.push(Arc::new(channel));
        self
    }

    /// Set the Z positions to visit
    #[must_use]
    pub fn slices(mut self, slices: impl Into<Vec<f64>>) -> Self {
        self.settings.slices = slices.into();
        self
    }

    /// Interpret slices as offsets from the given reference position
    ///
    /// Sets `relative_z_slice` and `z_reference` together.
    #[must_use]
    pub fn relative_z(mut self, reference: f64) -> Self {
        self.settings.relative_z_slice = true;
        self.settings.z_reference = reference;
        self
    }

    /// Vary the slice coordinate before the channel coordinate
    #[must_use]
    pub fn slices_first(mut self, slices_first: bool) -> Self {
        self.settings.slices_first = slices_first;
        self
    }

    /// Vary the frame coordinate before the position coordinate
    #[must_use]
    pub fn time_first(mut self, time_first: bool) -> Self {
        self.settings.time_first = time_first;
        self
    }

    /// Keep the shutter open across slice transitions
    #[must_use]
    pub fn keep_shutter_open_slices(mut self, keep_open: bool) -> Self {
        self.settings.keep_shutter_open_slices = keep_open;
        self
    }

    /// Keep the shutter open across channel transitions
    #[must_use]
    pub fn keep_shutter_open_channels(mut self, keep_open: bool) -> Self {
        self.settings.keep_shutter_open_channels = keep_open;
        self
    }

    /// Enable autofocus, skipping the given number of eligible
    /// opportunities between runs (0 runs every time)
    #[must_use]
    pub fn autofocus(mut self, skip_count: u32) -> Self {
        self.settings.use_autofocus = true;
        self.settings.skip_autofocus_count = skip_count;
        self
    }

    /// Save output under `root`/`prefix`
    ///
    /// Sets `save` together with both path fields.
    #[must_use]
    pub fn save_to(mut self, root: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.settings.save = true;
        self.settings.root = Some(root.into());
        self.settings.prefix = Some(prefix.into());
        self
    }

    /// Set the free-text annotation
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.settings.comment = comment.into();
        self
    }

    /// Iterate an externally supplied multi-position list
    #[must_use]
    pub fn use_position_list(mut self, use_list: bool) -> Self {
        self.settings.use_position_list = use_list;
        self
    }

    /// Set the minimum camera-sequence timeout in milliseconds
    #[must_use]
    pub fn camera_timeout(mut self, timeout_ms: u32) -> Self {
        self.settings.camera_timeout = timeout_ms;
        self
    }

    /// Route acquired images to a live display
    #[must_use]
    pub fn display_images(mut self, display: bool) -> Self {
        self.settings.should_display_images = display;
        self
    }

    /// Build the settings value
    #[must_use]
    pub fn build(self) -> AcquisitionSettings {
        self.settings
    }
}

// =============================================================================
// Tests
// =============================================================================
