//! GPX 1.1 export for matched activity data.

use crate::export::matcher::match_heart_rate;
use crate::export::types::{
    Activity, ExportError, GpxExport, HeartRateSample, LocationSample, MatchedPoint,
};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// GPX XML namespaces
const NS_GPX: &str = "http://www.topografix.com/GPX/1/1";
const NS_TPX: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";

/// `creator` attribute value on the root element.
const CREATOR: &str = concat!("ridegpx/", env!("CARGO_PKG_VERSION"));

fn iso_instant(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serialize matched points to a GPX 1.1 document.
///
/// The activity name is derived from the start time as
/// `"Cycling <local yyyy-mm-dd hh:mm>"`. Track points are emitted in input
/// order; a point without a heart rate gets no `<extensions>` element.
pub fn export_gpx(
    started_at: DateTime<Utc>,
    points: &[MatchedPoint],
) -> Result<String, ExportError> {
    let name = format!(
        "Cycling {}",
        started_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    export_gpx_named(&name, started_at, points)
}

/// Serialize matched points to a GPX 1.1 document with an explicit name.
pub fn export_gpx_named(
    name: &str,
    started_at: DateTime<Utc>,
    points: &[MatchedPoint],
) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    // XML declaration
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    // Root element
    let mut root = BytesStart::new("gpx");
    root.push_attribute(("version", "1.1"));
    root.push_attribute(("creator", CREATOR));
    root.push_attribute(("xmlns", NS_GPX));
    root.push_attribute(("xmlns:gpxtpx", NS_TPX));
    root.push_attribute(("xmlns:xsi", NS_XSI));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    // Metadata block
    writer
        .write_event(Event::Start(BytesStart::new("metadata")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;
    write_element(&mut writer, "name", name)?;
    write_element(&mut writer, "time", &iso_instant(started_at))?;
    writer
        .write_event(Event::End(BytesEnd::new("metadata")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    // Single track with one segment
    writer
        .write_event(Event::Start(BytesStart::new("trk")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;
    write_element(&mut writer, "name", name)?;
    write_element(&mut writer, "type", "cycling")?;

    writer
        .write_event(Event::Start(BytesStart::new("trkseg")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    for point in points {
        write_trackpoint(&mut writer, point)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("trkseg")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    writer
        .write_event(Event::End(BytesEnd::new("trk")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    writer
        .write_event(Event::End(BytesEnd::new("gpx")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    let result = writer.into_inner().into_inner();
    String::from_utf8(result).map_err(|e| ExportError::XmlError(e.to_string()))
}

/// Write a single trackpoint.
fn write_trackpoint<W: std::io::Write>(
    writer: &mut Writer<W>,
    point: &MatchedPoint,
) -> Result<(), ExportError> {
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", format!("{:.6}", point.location.latitude).as_str()));
    trkpt.push_attribute(("lon", format!("{:.6}", point.location.longitude).as_str()));
    writer
        .write_event(Event::Start(trkpt))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    write_element(writer, "ele", &format!("{:.1}", point.location.elevation))?;
    write_element(writer, "time", &iso_instant(point.location.timestamp))?;

    // No extensions element at all when heart rate is absent
    if let Some(hr) = point.heart_rate_bpm {
        writer
            .write_event(Event::Start(BytesStart::new("extensions")))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
        writer
            .write_event(Event::Start(BytesStart::new("gpxtpx:TrackPointExtension")))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
        write_element(writer, "gpxtpx:hr", &hr.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("gpxtpx:TrackPointExtension")))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
        writer
            .write_event(Event::End(BytesEnd::new("extensions")))
            .map_err(|e| ExportError::XmlError(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("trkpt")))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    Ok(())
}

/// Write a simple element with text content.
fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| ExportError::XmlError(e.to_string()))?;

    Ok(())
}

/// Match heart-rate samples to locations and serialize one activity.
pub fn export_activity(
    activity: &Activity,
    locations: &[LocationSample],
    hr_samples: &[HeartRateSample],
) -> Result<GpxExport, ExportError> {
    let matched = match_heart_rate(locations, hr_samples);
    let xml = export_gpx(activity.started_at, &matched)?;
    let filename = generate_gpx_filename(activity.started_at);

    tracing::info!(
        "Exported activity {} with {} track points",
        activity.id,
        matched.len()
    );

    Ok(GpxExport { filename, xml })
}

/// Serialize matched points and write the document to a file.
pub fn export_gpx_to_file(
    started_at: DateTime<Utc>,
    points: &[MatchedPoint],
    path: &std::path::Path,
) -> Result<(), ExportError> {
    let content = export_gpx(started_at, points)?;
    std::fs::write(path, content)?;
    tracing::debug!("Wrote GPX file {}", path.display());
    Ok(())
}

/// Generate the default filename for an activity export.
pub fn generate_gpx_filename(started_at: DateTime<Utc>) -> String {
    let timestamp = started_at.with_timezone(&Local).format("%Y-%m-%d_%H%M%S");
    format!("workout_{}.gpx", timestamp)
}
