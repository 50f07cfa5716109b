//! Renders TCX documents as indented UTF-8 XML

use super::document::{
    Creator, Lap, TrainingCenterDatabase, Trackpoint, SCHEMA_LOCATION, TCX_NAMESPACE,
    XSI_NAMESPACE,
};
use crate::core::dates::format_tcx_timestamp;
use crate::domain::{HealthTcxError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `document` to `sink`
///
/// # Errors
///
/// Returns [`HealthTcxError::DocumentWrite`] if the sink fails.
pub fn render<W: Write>(document: &TrainingCenterDatabase, sink: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    write_database(&mut writer, document).map_err(|e| HealthTcxError::DocumentWrite(e.to_string()))?;
    writer
        .get_mut()
        .write_all(b"\n")
        .map_err(|e| HealthTcxError::DocumentWrite(e.to_string()))
}

/// Renders `document` into a string
///
/// # Errors
///
/// Same as [`render`].
pub fn render_to_string(document: &TrainingCenterDatabase) -> Result<String> {
    let mut buffer = Vec::new();
    render(document, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| HealthTcxError::DocumentWrite(e.to_string()))
}

/// Writes `document` to `path`, replacing any existing file
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`HealthTcxError::DocumentWrite`] if the file cannot be created or
/// written.
pub fn write_document(document: &TrainingCenterDatabase, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| HealthTcxError::DocumentWrite(format!("{}: {}", path.display(), e)))?;
    let mut sink = BufWriter::new(file);
    render(document, &mut sink)?;
    sink.flush()
        .map_err(|e| HealthTcxError::DocumentWrite(format!("{}: {}", path.display(), e)))
}

/// Decimal text for a measurement; whole numbers keep a trailing `.0`
fn decimal(value: f64) -> String {
    format!("{value:?}")
}

fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

/// `<name><Value>bpm</Value></name>`
fn heart_rate_element<W: Write>(writer: &mut Writer<W>, name: &str, bpm: i64) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    text_element(writer, "Value", &bpm.to_string())?;
    end(writer, name)
}

fn write_database<W: Write>(
    writer: &mut Writer<W>,
    document: &TrainingCenterDatabase,
) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    start(
        writer,
        BytesStart::new("TrainingCenterDatabase").with_attributes([
            ("xmlns", TCX_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ]),
    )?;
    start(writer, BytesStart::new("Activities"))?;

    let activity = &document.activity;
    start(
        writer,
        BytesStart::new("Activity").with_attributes([("Sport", activity.sport.as_str())]),
    )?;
    text_element(writer, "Id", &format_tcx_timestamp(&activity.id))?;
    write_lap(writer, &activity.lap)?;
    write_creator(writer, &activity.creator)?;
    end(writer, "Activity")?;

    end(writer, "Activities")?;
    end(writer, "TrainingCenterDatabase")
}

fn write_lap<W: Write>(writer: &mut Writer<W>, lap: &Lap) -> Result<()> {
    let start_time = format_tcx_timestamp(&lap.start_time);
    start(
        writer,
        BytesStart::new("Lap").with_attributes([("StartTime", start_time.as_str())]),
    )?;

    text_element(writer, "TotalTimeSeconds", &decimal(lap.total_time_seconds))?;
    if let Some(meters) = lap.distance_meters {
        text_element(writer, "DistanceMeters", &decimal(meters))?;
    }
    if let Some(calories) = lap.calories {
        text_element(writer, "Calories", &calories.to_string())?;
    }
    if let Some(bpm) = lap.average_heart_rate_bpm {
        heart_rate_element(writer, "AverageHeartRateBpm", bpm)?;
    }
    if let Some(bpm) = lap.maximum_heart_rate_bpm {
        heart_rate_element(writer, "MaximumHeartRateBpm", bpm)?;
    }

    if !lap.track.is_empty() {
        start(writer, BytesStart::new("Track"))?;
        for point in &lap.track {
            write_trackpoint(writer, point)?;
        }
        end(writer, "Track")?;
    }

    end(writer, "Lap")
}

fn write_trackpoint<W: Write>(writer: &mut Writer<W>, point: &Trackpoint) -> Result<()> {
    start(writer, BytesStart::new("Trackpoint"))?;
    text_element(writer, "Time", &format_tcx_timestamp(&point.time))?;

    start(writer, BytesStart::new("Position"))?;
    text_element(writer, "LatitudeDegrees", &decimal(point.latitude_degrees))?;
    text_element(writer, "LongitudeDegrees", &decimal(point.longitude_degrees))?;
    end(writer, "Position")?;

    text_element(writer, "AltitudeMeters", &decimal(point.altitude_meters))?;
    if let Some(bpm) = point.heart_rate_bpm {
        heart_rate_element(writer, "HeartRateBpm", bpm)?;
    }

    end(writer, "Trackpoint")
}

fn write_creator<W: Write>(writer: &mut Writer<W>, creator: &Creator) -> Result<()> {
    start(
        writer,
        BytesStart::new("Creator").with_attributes([("xsi:type", "Device_t")]),
    )?;
    text_element(writer, "Name", &creator.name)?;
    text_element(writer, "UnitId", &creator.unit_id.to_string())?;
    text_element(writer, "ProductID", &creator.product_id.to_string())?;
    end(writer, "Creator")
}
