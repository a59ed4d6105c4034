//! Conversion of raw records into typed [`Unit`]s.
//!
//! Normalisation is all-or-nothing: the first malformed record fails the
//! whole batch, and the error names the offending field and record index.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{GeometryError, NormalizationError};
use crate::geo::GeoCoordinate;
use crate::record::{RawRecord, RawValue};
use crate::unit::{Rgb, Unit};

const ID_KEYS: &[&str] = &["ID"];
const LOCATION_KEYS: &[&str] = &["Location", "Position"];
const LATITUDE_KEYS: &[&str] = &["Latitude", "Lat"];
const LONGITUDE_KEYS: &[&str] = &["Longitude", "Lon", "Lng"];
const GUI_KEYS: &[&str] = &["Gui"];
const COLOR_KEYS: &[&str] = &["Color", "Colour", "Style"];
const RED_KEYS: &[&str] = &["Red", "R"];
const GREEN_KEYS: &[&str] = &["Green", "G"];
const BLUE_KEYS: &[&str] = &["Blue", "B"];

/// Normalise a batch of raw records.
///
/// Fails on the first record that lacks an identifier, location or color, has
/// an unparsable number, or repeats an identifier already seen in the batch.
pub fn normalize(records: &[RawRecord]) -> Result<Vec<Unit>, NormalizationError> {
    let units = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&units)?;

    debug!(units = units.len(), "normalised unit records");
    Ok(units)
}

/// Reject a batch in which two units share an identifier.
///
/// Indices in the error are positions within `units`.
pub fn ensure_unique_ids(units: &[Unit]) -> Result<(), NormalizationError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(units.len());
    for (index, unit) in units.iter().enumerate() {
        if let Some(&first_index) = seen.get(unit.id.as_str()) {
            return Err(NormalizationError::DuplicateId {
                id: unit.id.clone(),
                first_index,
                record_index: index,
            });
        }
        seen.insert(unit.id.as_str(), index);
    }
    Ok(())
}

/// Normalise a single record; `index` is only used for error reporting.
pub fn normalize_record(record: &RawRecord, index: usize) -> Result<Unit, NormalizationError> {
    let id = parse_id(record, index)?;
    let coordinate = parse_location(record, index)?;
    let color = parse_color(record, index)?;
    Ok(Unit::new(id, coordinate, color))
}

fn parse_id(record: &RawRecord, index: usize) -> Result<String, NormalizationError> {
    record
        .field(ID_KEYS)
        .and_then(RawValue::as_text)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(NormalizationError::MissingField("id", index))
}

fn parse_location(record: &RawRecord, index: usize) -> Result<GeoCoordinate, NormalizationError> {
    let (latitude, longitude) = match record.field(LOCATION_KEYS) {
        Some(location) => match location.unwrap_singleton() {
            RawValue::Map(_)
                if location.field(LATITUDE_KEYS).is_some() || location.scalar().is_none() =>
            {
                (
                    numeric(location, LATITUDE_KEYS, "latitude", index)?,
                    numeric(location, LONGITUDE_KEYS, "longitude", index)?,
                )
            }
            // Fragmented `[lat, lon]` pair.
            _ => match location.as_f64_pair() {
                Some(pair) => pair,
                None => parse_pair(location, index)?,
            },
        },
        // Flat records carry latitude/longitude directly.
        None if record.field(LATITUDE_KEYS).is_some() => (
            numeric(record, LATITUDE_KEYS, "latitude", index)?,
            numeric(record, LONGITUDE_KEYS, "longitude", index)?,
        ),
        None => return Err(NormalizationError::MissingField("location", index)),
    };

    GeoCoordinate::new(latitude, longitude).map_err(|err| match err {
        GeometryError::OutOfRange { field, .. } => {
            NormalizationError::InvalidCoordinate(field, index)
        }
        GeometryError::NonFinite => NormalizationError::InvalidNumeric("location", index),
    })
}

/// A location given as a single `"lat,lon"` scalar.
fn parse_pair(value: &RawValue, index: usize) -> Result<(f64, f64), NormalizationError> {
    let text = value
        .as_text()
        .ok_or(NormalizationError::InvalidNumeric("location", index))?;
    let (lat, lon) = text
        .split_once(',')
        .ok_or(NormalizationError::MissingField("longitude", index))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| NormalizationError::InvalidNumeric("latitude", index))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|_| NormalizationError::InvalidNumeric("longitude", index))?;
    Ok((latitude, longitude))
}

fn parse_color(record: &RawRecord, index: usize) -> Result<Rgb, NormalizationError> {
    let color = record
        .field(GUI_KEYS)
        .and_then(|gui| gui.field(COLOR_KEYS))
        .or_else(|| record.field(COLOR_KEYS))
        .ok_or(NormalizationError::MissingField("color", index))?;

    Ok(Rgb::new(
        channel(color, RED_KEYS, "red", index)?,
        channel(color, GREEN_KEYS, "green", index)?,
        channel(color, BLUE_KEYS, "blue", index)?,
    ))
}

fn numeric(
    parent: &RawValue,
    keys: &[&str],
    field: &'static str,
    index: usize,
) -> Result<f64, NormalizationError> {
    let value = parent
        .field(keys)
        .ok_or(NormalizationError::MissingField(field, index))?;
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or(NormalizationError::InvalidNumeric(field, index))
}

fn channel(
    color: &RawValue,
    keys: &[&str],
    field: &'static str,
    index: usize,
) -> Result<u8, NormalizationError> {
    let value = numeric(color, keys, field, index)?;
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return Err(NormalizationError::InvalidNumeric(field, index));
    }
    Ok(value as u8)
}
