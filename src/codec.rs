//! Versioned JSON codec for acquisition settings
//!
//! Encodes an [`AcquisitionSettings`] value as pretty-printed JSON with one
//! top-level key per field, and decodes such text back. The mapping is an
//! explicit field-name-to-typed-setter table rather than a derive, so the
//! compatibility rules are deliberate:
//!
//! - keys missing from the input keep their constructed defaults, so old
//!   payloads load under newer schema revisions;
//! - unknown keys are ignored, so newer payloads load under older ones;
//! - optional fields are omitted when absent and accept `null` as absent,
//!   and absence round-trips exactly;
//! - a key whose value cannot be coerced to the declared type fails the
//!   whole decode with [`Error::MalformedInput`] - a failed decode never
//!   yields a partially populated value.
//!
//! Both directions are pure text transforms; file handling lives in
//! [`crate::storage`].

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value, json};

use crate::channel::ChannelSpec;
use crate::error::{Error, Result};
use crate::settings::AcquisitionSettings;

/// Schema revision of the serialized format.
///
/// Written into every payload by [`to_json`]. [`from_json`] reads it when
/// present but accepts any revision; field-level tolerance carries the
/// compatibility burden.
pub const FORMAT_VERSION: f64 = 1.1;

/// Encode settings as pretty-printed JSON text.
///
/// # Errors
///
/// Propagates the underlying JSON writer's error. Not reachable for a
/// well-typed in-memory value.
pub fn to_json(settings: &AcquisitionSettings) -> Result<String> {
    let mut map = Map::new();

    map.insert("version".into(), json!(FORMAT_VERSION));

    map.insert("numFrames".into(), json!(settings.num_frames));
    map.insert("intervalMs".into(), json!(settings.interval_ms));
    map.insert(
        "useCustomIntervals".into(),
        json!(settings.use_custom_intervals),
    );
    if let Some(intervals) = &settings.custom_intervals_ms {
        map.insert("customIntervalsMs".into(), json!(intervals));
    }

    let channels = settings
        .channels
        .iter()
        .map(|channel| serde_json::to_value(channel.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    map.insert("channels".into(), Value::Array(channels));
    map.insert("channelGroup".into(), json!(settings.channel_group));

    map.insert("slices".into(), json!(settings.slices));
    map.insert("relativeZSlice".into(), json!(settings.relative_z_slice));
    map.insert("zReference".into(), json!(settings.z_reference));

    map.insert("slicesFirst".into(), json!(settings.slices_first));
    map.insert("timeFirst".into(), json!(settings.time_first));
    map.insert(
        "keepShutterOpenSlices".into(),
        json!(settings.keep_shutter_open_slices),
    );
    map.insert(
        "keepShutterOpenChannels".into(),
        json!(settings.keep_shutter_open_channels),
    );

    map.insert("useAutofocus".into(), json!(settings.use_autofocus));
    map.insert(
        "skipAutofocusCount".into(),
        json!(settings.skip_autofocus_count),
    );

    map.insert("save".into(), json!(settings.save));
    if let Some(root) = &settings.root {
        map.insert("root".into(), json!(root));
    }
    if let Some(prefix) = &settings.prefix {
        map.insert("prefix".into(), json!(prefix));
    }
    map.insert("comment".into(), json!(settings.comment));
    map.insert("usePositionList".into(), json!(settings.use_position_list));
    map.insert("cameraTimeout".into(), json!(settings.camera_timeout));
    map.insert(
        "shouldDisplayImages".into(),
        json!(settings.should_display_images),
    );

    Ok(serde_json::to_string_pretty(&Value::Object(map))?)
}

/// Decode settings from JSON text.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the text is not a well-formed
/// JSON object or a present field cannot be coerced to its declared type.
pub fn from_json(text: &str) -> Result<AcquisitionSettings> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::MalformedInput(format!("not valid JSON: {e}")))?;

    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            return Err(Error::MalformedInput(format!(
                "expected a settings object, got {}",
                describe(&other)
            )));
        }
    };

    if let Some(v) = obj.get("version") {
        let version = v.as_f64().ok_or_else(|| type_error("version", "a number", v))?;
        if version != FORMAT_VERSION {
            debug!("Reading settings payload with format version {version} (current: {FORMAT_VERSION})");
        }
    }

    let mut settings = AcquisitionSettings::default();

    set_u32(&obj, "numFrames", &mut settings.num_frames)?;
    set_f64(&obj, "intervalMs", &mut settings.interval_ms)?;
    set_bool(&obj, "useCustomIntervals", &mut settings.use_custom_intervals)?;
    set_opt_f64_seq(&obj, "customIntervalsMs", &mut settings.custom_intervals_ms)?;

    set_channels(&obj, "channels", &mut settings.channels)?;
    set_string(&obj, "channelGroup", &mut settings.channel_group)?;

    set_f64_seq(&obj, "slices", &mut settings.slices)?;
    set_bool(&obj, "relativeZSlice", &mut settings.relative_z_slice)?;
    set_f64(&obj, "zReference", &mut settings.z_reference)?;

    set_bool(&obj, "slicesFirst", &mut settings.slices_first)?;
    set_bool(&obj, "timeFirst", &mut settings.time_first)?;
    set_bool(
        &obj,
        "keepShutterOpenSlices",
        &mut settings.keep_shutter_open_slices,
    )?;
    set_bool(
        &obj,
        "keepShutterOpenChannels",
        &mut settings.keep_shutter_open_channels,
    )?;

    set_bool(&obj, "useAutofocus", &mut settings.use_autofocus)?;
    set_u32(&obj, "skipAutofocusCount", &mut settings.skip_autofocus_count)?;

    set_bool(&obj, "save", &mut settings.save)?;
    set_opt_string(&obj, "root", &mut settings.root)?;
    set_opt_string(&obj, "prefix", &mut settings.prefix)?;
    set_string(&obj, "comment", &mut settings.comment)?;
    set_bool(&obj, "usePositionList", &mut settings.use_position_list)?;
    set_u32(&obj, "cameraTimeout", &mut settings.camera_timeout)?;
    set_bool(
        &obj,
        "shouldDisplayImages",
        &mut settings.should_display_images,
    )?;

    Ok(settings)
}

// =============================================================================
// Typed field setters
// =============================================================================
// Each setter leaves the target untouched when the key is missing and fails
// on a present value of the wrong type.

fn set_u32(obj: &Map<String, Value>, key: &str, target: &mut u32) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| type_error(key, "a non-negative integer", v))?;
    }
    Ok(())
}

fn set_f64(obj: &Map<String, Value>, key: &str, target: &mut f64) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = v.as_f64().ok_or_else(|| type_error(key, "a number", v))?;
    }
    Ok(())
}

fn set_bool(obj: &Map<String, Value>, key: &str, target: &mut bool) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = v.as_bool().ok_or_else(|| type_error(key, "a boolean", v))?;
    }
    Ok(())
}

fn set_string(obj: &Map<String, Value>, key: &str, target: &mut String) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = v
            .as_str()
            .ok_or_else(|| type_error(key, "a string", v))?
            .to_owned();
    }
    Ok(())
}

fn set_opt_string(obj: &Map<String, Value>, key: &str, target: &mut Option<String>) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = match v {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => return Err(type_error(key, "a string or null", other)),
        };
    }
    Ok(())
}

fn set_f64_seq(obj: &Map<String, Value>, key: &str, target: &mut Vec<f64>) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = f64_seq(key, v)?;
    }
    Ok(())
}

fn set_opt_f64_seq(
    obj: &Map<String, Value>,
    key: &str,
    target: &mut Option<Vec<f64>>,
) -> Result<()> {
    if let Some(v) = obj.get(key) {
        *target = match v {
            Value::Null => None,
            other => Some(f64_seq(key, other)?),
        };
    }
    Ok(())
}

fn f64_seq(key: &str, v: &Value) -> Result<Vec<f64>> {
    let items = v
        .as_array()
        .ok_or_else(|| type_error(key, "an array of numbers", v))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .ok_or_else(|| type_error(&format!("{key}[{i}]"), "a number", item))
        })
        .collect()
}

fn set_channels(
    obj: &Map<String, Value>,
    key: &str,
    target: &mut Vec<Arc<ChannelSpec>>,
) -> Result<()> {
    if let Some(v) = obj.get(key) {
        let items = v.as_array().ok_or_else(|| type_error(key, "an array", v))?;
        let mut channels = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let channel: ChannelSpec = serde_json::from_value(item.clone()).map_err(|e| {
                Error::MalformedInput(format!("field '{key}[{i}]': not a valid channel record: {e}"))
            })?;
            channels.push(Arc::new(channel));
        }
        *target = channels;
    }
    Ok(())
}

fn type_error(key: &str, expected: &str, found: &Value) -> Error {
    Error::MalformedInput(format!(
        "field '{key}': expected {expected}, got {}",
        describe(found)
    ))
}

fn describe(v: &Value) -> String {
    match v {
        Value::Array(_) => "an array".into(),
        Value::Object(_) => "an object".into(),
        scalar => scalar.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_defaults() {
        let settings = AcquisitionSettings::default();

        let text = to_json(&settings).unwrap();
        let decoded = from_json(&text).unwrap();

        assert_eq!(decoded, settings);
        assert!(decoded.custom_intervals_ms.is_none());
        assert!(decoded.root.is_none());
        assert!(decoded.prefix.is_none());
    }

    #[test]
    fn test_round_trip_populated() {
        let settings = AcquisitionSettings::builder()
            .num_frames(4)
            .custom_intervals_ms([10.0, 20.0, 30.0, 40.0])
            .channel_group("Fluorescence")
            .channels([ChannelSpec::new("DAPI", 25.0), ChannelSpec::new("FITC", 50.0)])
            .slices([-1.0, 0.0, 1.0])
            .relative_z(100.5)
            .slices_first(true)
            .keep_shutter_open_channels(true)
            .autofocus(3)
            .save_to("/data/session", "run42")
            .comment("overnight run")
            .use_position_list(true)
            .camera_timeout(30_000)
            .display_images(false)
            .build();

        let decoded = from_json(&to_json(&settings).unwrap()).unwrap();

        assert_eq!(decoded, settings);
    }

    #[test]
    fn test_output_is_pretty_printed_with_field_keys() {
        let text = to_json(&AcquisitionSettings::default()).unwrap();

        assert!(text.contains('\n'));
        assert!(text.contains("\"version\": 1.1"));
        assert!(text.contains("\"numFrames\": 1"));
        assert!(text.contains("\"intervalMs\": 0.0"));
        assert!(text.contains("\"cameraTimeout\": 20000"));
        assert!(text.contains("\"shouldDisplayImages\": true"));
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let text = to_json(&AcquisitionSettings::default()).unwrap();

        assert!(!text.contains("customIntervalsMs"));
        assert!(!text.contains("\"root\""));
        assert!(!text.contains("\"prefix\""));
    }

    #[test]
    fn test_partial_payload_keeps_defaults() {
        let decoded = from_json(r#"{"numFrames": 5}"#).unwrap();

        let expected = AcquisitionSettings::builder().num_frames(5).build();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let decoded = from_json(r#"{"numFrames": 2, "laserWattage": 9000}"#).unwrap();

        assert_eq!(decoded.num_frames, 2);
    }

    #[test]
    fn test_foreign_version_is_tolerated() {
        let decoded = from_json(r#"{"version": 0.9, "numFrames": 7}"#).unwrap();

        assert_eq!(decoded.num_frames, 7);
    }

    #[test]
    fn test_null_optional_decodes_as_absent() {
        let decoded =
            from_json(r#"{"customIntervalsMs": null, "root": null, "prefix": null}"#).unwrap();

        assert!(decoded.custom_intervals_ms.is_none());
        assert!(decoded.root.is_none());
        assert!(decoded.prefix.is_none());
    }

    #[test]
    fn test_unparsable_text_is_rejected() {
        let result = from_json("{not valid}");

        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let result = from_json("[1, 2, 3]");

        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_wrongly_typed_field_is_rejected() {
        let result = from_json(r#"{"numFrames": "five"}"#);

        let err = result.unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("numFrames"));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let result = from_json(r#"{"numFrames": -3}"#);

        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_wrongly_typed_sequence_element_is_rejected() {
        let result = from_json(r#"{"slices": [0.0, "one", 2.0]}"#);

        let err = result.unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("slices[1]"));
    }

    #[test]
    fn test_wrongly_typed_channel_entry_is_rejected() {
        let result = from_json(r#"{"channels": [{"config": "DAPI", "exposure": "long"}]}"#);

        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_decode_failure_yields_no_instance() {
        // A bad field late in the payload must not leak earlier fields.
        let result = from_json(r#"{"numFrames": 9, "shouldDisplayImages": "yes"}"#);

        assert!(result.is_err());
    }
}
