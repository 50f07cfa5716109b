//! Streaming GPX 1.1 track reader
//!
//! Only `trkpt` elements in the GPX 1.1 namespace are read, at any depth.
//! Per point:
//! - `lat`/`lon` attributes default to 0
//! - the first direct `ele` child gives the elevation, 0 if absent
//! - the first direct `time` child gives the timestamp; a point without one is skipped
//! - speed comes from an un-namespaced `speed` directly inside the point's `extensions`
//!
//! Any malformed value fails the whole file.

use crate::adapters::xml::{attribute, DocumentShape};
use crate::core::dates::parse_track_timestamp;
use crate::domain::{HealthTcxError, Result, TrackPoint};
use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::io::BufRead;
use std::path::Path;

/// GPX 1.1 namespace URI
pub const GPX_NAMESPACE: &[u8] = b"http://www.topografix.com/GPX/1/1";

/// Reads the points of a workout route
///
/// Never fails: an absent path, a missing file and a malformed file all yield
/// an empty track, the last one with a warning.
///
/// # Examples
///
/// ```
/// use healthtcx::adapters::gpx::parse_track;
/// use std::path::Path;
///
/// assert!(parse_track(None).is_empty());
/// assert!(parse_track(Some(Path::new("/no/such/route.gpx"))).is_empty());
/// ```
pub fn parse_track(path: Option<&Path>) -> Vec<TrackPoint> {
    let Some(path) = path else {
        return Vec::new();
    };

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "Route file not found, continuing without track");
        return Vec::new();
    }

    match read_track_file(path) {
        Ok(points) => {
            tracing::debug!(path = %path.display(), points = points.len(), "Route parsed");
            points
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to parse route file, continuing without track"
            );
            Vec::new()
        }
    }
}

/// Reads a GPX file, reporting faults instead of swallowing them
///
/// # Errors
///
/// Returns [`HealthTcxError::TrackParse`] if the file cannot be opened, is not
/// well-formed, or holds a malformed coordinate, elevation, time or speed.
pub fn read_track_file(path: &Path) -> Result<Vec<TrackPoint>> {
    let reader = NsReader::from_file(path)
        .map_err(|e| HealthTcxError::TrackParse(format!("{}: {}", path.display(), e)))?;
    read_track_points(reader)
}

/// Reads GPX content held in memory
///
/// # Errors
///
/// Same as [`read_track_file`].
pub fn parse_track_str(content: &str) -> Result<Vec<TrackPoint>> {
    read_track_points(NsReader::from_str(content))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Elevation,
    Time,
    Speed,
}

impl Field {
    fn tag(self) -> &'static str {
        match self {
            Field::Elevation => "ele",
            Field::Time => "time",
            Field::Speed => "speed",
        }
    }
}

/// Text being collected for one child element
#[derive(Debug)]
struct Capture {
    field: Field,
    level: usize,
    text: String,
}

/// A `trkpt` whose end tag has not been seen yet
#[derive(Debug)]
struct PendingPoint {
    level: usize,
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    timestamp: Option<DateTime<FixedOffset>>,
    speed: Option<f64>,
    seen_elevation: bool,
    seen_time: bool,
    seen_extensions: bool,
    seen_speed: bool,
    extensions_level: Option<usize>,
}

impl PendingPoint {
    fn open(element: &BytesStart<'_>, level: usize) -> Result<Self> {
        Ok(Self {
            level,
            latitude: coordinate(element, "lat")?,
            longitude: coordinate(element, "lon")?,
            elevation: None,
            timestamp: None,
            speed: None,
            seen_elevation: false,
            seen_time: false,
            seen_extensions: false,
            seen_speed: false,
            extensions_level: None,
        })
    }

    /// Decides whether a child element starts a capture
    ///
    /// `level` is the depth the child opens at.
    fn child(&mut self, local: &[u8], resolved: &Resolved, level: usize) -> Option<Field> {
        if level == self.level + 1 && *resolved == Resolved::Gpx {
            match local {
                b"ele" if !self.seen_elevation => {
                    self.seen_elevation = true;
                    return Some(Field::Elevation);
                }
                b"time" if !self.seen_time => {
                    self.seen_time = true;
                    return Some(Field::Time);
                }
                b"extensions" if !self.seen_extensions => {
                    self.seen_extensions = true;
                    self.extensions_level = Some(level);
                }
                _ => {}
            }
        } else if self.extensions_level.map(|ext| ext + 1) == Some(level)
            && *resolved == Resolved::Unbound
            && local == b"speed"
            && !self.seen_speed
        {
            self.seen_speed = true;
            return Some(Field::Speed);
        }
        None
    }

    fn store(&mut self, capture: Capture) -> Result<()> {
        let text = capture.text.trim();
        if text.is_empty() {
            return Err(HealthTcxError::TrackParse(format!(
                "<{}> element has no value",
                capture.field.tag()
            )));
        }

        match capture.field {
            Field::Elevation => self.elevation = Some(number(capture.field, text)?),
            Field::Speed => self.speed = Some(number(capture.field, text)?),
            Field::Time => {
                let timestamp = parse_track_timestamp(text)
                    .map_err(|e| HealthTcxError::TrackParse(e.to_string()))?;
                self.timestamp = Some(timestamp);
            }
        }
        Ok(())
    }

    fn finish(self) -> Option<TrackPoint> {
        let timestamp = self.timestamp?;
        let point = TrackPoint::new(
            self.latitude,
            self.longitude,
            self.elevation.unwrap_or(0.0),
            timestamp,
        );
        Some(match self.speed {
            Some(speed) => point.with_speed(speed),
            None => point,
        })
    }
}

#[derive(Debug, PartialEq)]
enum Resolved {
    Gpx,
    Unbound,
    Foreign,
}

impl Resolved {
    fn classify(result: &ResolveResult<'_>) -> Self {
        match result {
            ResolveResult::Bound(Namespace(ns)) if *ns == GPX_NAMESPACE => Resolved::Gpx,
            ResolveResult::Unbound => Resolved::Unbound,
            _ => Resolved::Foreign,
        }
    }
}

fn coordinate(element: &BytesStart<'_>, name: &str) -> Result<f64> {
    match attribute(element, name).map_err(track_error)? {
        Some(value) => value.trim().parse().map_err(|_| {
            HealthTcxError::TrackParse(format!("invalid {} attribute '{}'", name, value))
        }),
        None => Ok(0.0),
    }
}

fn number(field: Field, text: &str) -> Result<f64> {
    text.parse().map_err(|_| {
        HealthTcxError::TrackParse(format!("invalid <{}> value '{}'", field.tag(), text))
    })
}

fn track_error(err: impl std::fmt::Display) -> HealthTcxError {
    HealthTcxError::TrackParse(err.to_string())
}

struct TrackScanner {
    shape: DocumentShape,
    pending: Option<PendingPoint>,
    capture: Option<Capture>,
    points: Vec<TrackPoint>,
}

impl TrackScanner {
    fn new() -> Self {
        Self {
            shape: DocumentShape::default(),
            pending: None,
            capture: None,
            points: Vec::new(),
        }
    }

    fn start(&mut self, element: &BytesStart<'_>, resolved: Resolved) -> Result<()> {
        let level = self.shape.depth();
        let local = element.local_name();

        if self.pending.is_none() {
            if resolved == Resolved::Gpx && local.as_ref() == b"trkpt" {
                self.pending = Some(PendingPoint::open(element, level)?);
            }
        } else if self.capture.is_none() {
            if let Some(pending) = self.pending.as_mut() {
                if let Some(field) = pending.child(local.as_ref(), &resolved, level) {
                    self.capture = Some(Capture {
                        field,
                        level,
                        text: String::new(),
                    });
                }
            }
        }

        self.shape.open().map_err(HealthTcxError::TrackParse)
    }

    fn empty(&mut self, element: &BytesStart<'_>, resolved: Resolved) -> Result<()> {
        self.start(element, resolved)?;
        self.end()
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.shape.text(text).map_err(HealthTcxError::TrackParse)?;
        if let Some(capture) = self.capture.as_mut() {
            if self.shape.depth() == capture.level + 1 {
                capture.text.push_str(text);
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.shape.close();
        let level = self.shape.depth();

        if self.capture.as_ref().is_some_and(|c| c.level == level) {
            if let (Some(capture), Some(pending)) = (self.capture.take(), self.pending.as_mut()) {
                pending.store(capture)?;
            }
        }

        if let Some(pending) = self.pending.as_mut() {
            if pending.extensions_level == Some(level) {
                pending.extensions_level = None;
            }
        }

        if self.pending.as_ref().is_some_and(|p| p.level == level) {
            if let Some(point) = self.pending.take().and_then(PendingPoint::finish) {
                self.points.push(point);
            }
        }
        Ok(())
    }
}

fn read_track_points<R: BufRead>(mut reader: NsReader<R>) -> Result<Vec<TrackPoint>> {
    reader.config_mut().trim_text(true);

    let mut scanner = TrackScanner::new();
    let mut buf = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf).map_err(track_error)?;
        let resolved = Resolved::classify(&ns);

        match event {
            Event::Start(e) => scanner.start(&e, resolved)?,
            Event::Empty(e) => scanner.empty(&e, resolved)?,
            Event::End(_) => scanner.end()?,
            Event::Text(t) => {
                let text = t.unescape().map_err(track_error)?;
                scanner.text(&text)?;
            }
            Event::CData(c) => scanner.text(&String::from_utf8_lossy(&c))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    scanner.shape.finish().map_err(HealthTcxError::TrackParse)?;
    Ok(scanner.points)
}
