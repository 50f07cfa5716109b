//! Streaming reader for the Apple Health `export.xml` archive
//!
//! Archives routinely run to hundreds of megabytes, so the file is scanned
//! event by event and only `Workout` subtrees are retained.

use super::entry::{StatisticEntry, WorkoutEntry, ELEVATION_KEY};
use crate::adapters::xml::{attribute, DocumentShape};
use crate::config::SourceConfig;
use crate::domain::{HealthTcxError, Result, WorkoutRecord};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Number of entries whose source names are logged for diagnostics
const SAMPLE_SOURCES: usize = 5;

/// Outcome of one archive scan
#[derive(Debug, Default)]
pub struct Extraction {
    /// Normalised records, in archive order
    pub records: Vec<WorkoutRecord>,

    /// `Workout` elements found
    pub total_entries: usize,

    /// Entries whose source matched the configured devices
    pub matched_entries: usize,

    /// Matched entries dropped for lacking a start or end date
    pub incomplete_entries: usize,

    /// Matched entries rejected for a malformed value, with the reason
    pub rejected: Vec<(String, HealthTcxError)>,
}

/// Extracts workouts recorded by the configured devices
///
/// # Examples
///
/// ```no_run
/// use healthtcx::adapters::health::WorkoutExtractor;
/// use healthtcx::config::SourceConfig;
///
/// let extractor = WorkoutExtractor::for_export_dir(SourceConfig::default(), "apple_health_export");
/// let records = extractor.extract_all(&extractor.archive_path()).unwrap();
/// println!("{} workouts", records.len());
/// ```
#[derive(Debug, Clone)]
pub struct WorkoutExtractor {
    source: SourceConfig,
    export_dir: PathBuf,
}

impl WorkoutExtractor {
    /// Creates an extractor for an unpacked Health export directory
    pub fn for_export_dir(source: SourceConfig, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            export_dir: export_dir.into(),
        }
    }

    /// Location of the archive file inside the export directory
    pub fn archive_path(&self) -> PathBuf {
        self.export_dir.join(&self.source.archive_file)
    }

    /// Root that route `FileReference` paths are resolved against
    pub fn routes_root(&self) -> PathBuf {
        self.export_dir.join(&self.source.routes_dir)
    }

    /// Returns every qualifying workout in archive order
    ///
    /// # Errors
    ///
    /// Returns [`HealthTcxError::ArchiveParse`] if the archive cannot be read
    /// or is not well-formed.
    pub fn extract_all(&self, archive_path: &Path) -> Result<Vec<WorkoutRecord>> {
        self.extract(archive_path).map(|extraction| extraction.records)
    }

    /// Scans the archive and reports what was kept and what was not
    ///
    /// # Errors
    ///
    /// Same as [`WorkoutExtractor::extract_all`].
    pub fn extract(&self, archive_path: &Path) -> Result<Extraction> {
        let reader = Reader::from_file(archive_path).map_err(|e| {
            HealthTcxError::ArchiveParse(format!("{}: {}", archive_path.display(), e))
        })?;
        let entries = read_workout_entries(reader).map_err(|e| {
            HealthTcxError::ArchiveParse(format!("{}: {}", archive_path.display(), e))
        })?;

        tracing::info!(
            archive = %archive_path.display(),
            workouts = entries.len(),
            "Archive scanned"
        );

        Ok(self.select(entries))
    }

    /// Filters and normalises scanned entries
    pub fn select(&self, entries: Vec<WorkoutEntry>) -> Extraction {
        let routes_root = self.routes_root();
        let mut extraction = Extraction {
            total_entries: entries.len(),
            ..Extraction::default()
        };

        for (index, entry) in entries.iter().enumerate() {
            if index < SAMPLE_SOURCES {
                tracing::debug!(index, source_name = %entry.source_name, "Sample workout source");
            }

            if !self.source.matches_source(&entry.source_name) {
                continue;
            }
            extraction.matched_entries += 1;

            match entry.normalize(&routes_root, &self.source.route_prefix) {
                Ok(Some(record)) => extraction.records.push(record),
                Ok(None) => {
                    extraction.incomplete_entries += 1;
                    tracing::debug!(
                        workout = %entry.describe(),
                        "Workout without start or end date skipped"
                    );
                }
                Err(e) => {
                    tracing::warn!(workout = %entry.describe(), error = %e, "Workout skipped");
                    extraction.rejected.push((entry.describe(), e));
                }
            }
        }

        tracing::info!(
            total = extraction.total_entries,
            matched = extraction.matched_entries,
            extracted = extraction.records.len(),
            device = %self.source.device_name,
            "Workouts selected"
        );

        extraction
    }
}

/// Collects one `WorkoutEntry` per `Workout` element, at any depth
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn read_workout_entries<R: BufRead>(mut reader: Reader<R>) -> Result<Vec<WorkoutEntry>> {
    reader.config_mut().trim_text(true);

    let mut scanner = ArchiveScanner::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => scanner.start(&e, false)?,
            Event::Empty(e) => scanner.start(&e, true)?,
            Event::End(_) => scanner.end(),
            Event::Text(t) => scanner.text(&t.unescape()?)?,
            Event::CData(c) => scanner.text(&String::from_utf8_lossy(&c))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    scanner.shape.finish().map_err(HealthTcxError::Other)?;
    Ok(scanner.entries)
}

/// Reads archive content held in memory
///
/// # Errors
///
/// Same as [`read_workout_entries`].
pub fn read_workout_entries_str(content: &str) -> Result<Vec<WorkoutEntry>> {
    read_workout_entries(Reader::from_str(content))
}

#[derive(Debug, Default)]
struct ArchiveScanner {
    shape: DocumentShape,
    /// Names of the currently open elements
    open: Vec<Vec<u8>>,
    current: Option<WorkoutEntry>,
    workout_level: usize,
    entries: Vec<WorkoutEntry>,
}

impl ArchiveScanner {
    fn start(&mut self, element: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        let name = element.name();
        let name = name.as_ref();
        let level = self.open.len();

        if self.current.is_none() {
            if name == b"Workout" {
                self.current = Some(workout_entry(element)?);
                self.workout_level = level;
            }
        } else if let Some(entry) = self.current.as_mut() {
            match name {
                b"WorkoutStatistics" => entry.statistics.push(statistic_entry(element)?),
                b"MetadataEntry" if entry.elevation_ascended.is_none() => {
                    if attribute(element, "key")?.as_deref() == Some(ELEVATION_KEY) {
                        entry.elevation_ascended = Some(
                            attribute(element, "value")?.unwrap_or_else(|| "0 cm".to_string()),
                        );
                    }
                }
                b"FileReference"
                    if entry.route_reference.is_none()
                        && self.open.last().map(Vec::as_slice) == Some(&b"WorkoutRoute"[..]) =>
                {
                    entry.route_reference =
                        Some(attribute(element, "path")?.unwrap_or_default());
                }
                _ => {}
            }
        }

        if is_empty {
            self.shape.empty().map_err(HealthTcxError::Other)?;
            self.finish_workout(level);
        } else {
            self.shape.open().map_err(HealthTcxError::Other)?;
            self.open.push(name.to_vec());
        }
        Ok(())
    }

    fn end(&mut self) {
        self.shape.close();
        self.open.pop();
        self.finish_workout(self.open.len());
    }

    fn text(&self, text: &str) -> Result<()> {
        self.shape.text(text).map_err(HealthTcxError::Other)
    }

    /// Closes the current workout when the element at `level` was its own
    fn finish_workout(&mut self, level: usize) {
        if self.current.is_some() && level == self.workout_level {
            if let Some(entry) = self.current.take() {
                self.entries.push(entry);
            }
        }
    }
}

fn workout_entry(element: &BytesStart<'_>) -> Result<WorkoutEntry> {
    Ok(WorkoutEntry {
        activity_type: attribute(element, "workoutActivityType")?.unwrap_or_default(),
        source_name: attribute(element, "sourceName")?.unwrap_or_default(),
        start_date: attribute(element, "startDate")?,
        end_date: attribute(element, "endDate")?,
        duration: attribute(element, "duration")?,
        ..WorkoutEntry::default()
    })
}

fn statistic_entry(element: &BytesStart<'_>) -> Result<StatisticEntry> {
    Ok(StatisticEntry {
        stat_type: attribute(element, "type")?.unwrap_or_default(),
        average: attribute(element, "average")?,
        minimum: attribute(element, "minimum")?,
        maximum: attribute(element, "maximum")?,
        sum: attribute(element, "sum")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SportCategory;

    const ARCHIVE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE HealthData [
<!ELEMENT HealthData (Workout)*>
]>
<HealthData locale="en_GB">
 <Record type="HKQuantityTypeIdentifierHeartRate" sourceName="Apple Watch" value="72"/>
 <Workout workoutActivityType="HKWorkoutActivityTypeRunning" duration="30" sourceName="Apple Watch" startDate="2024-01-15 10:00:00 +0000" endDate="2024-01-15 10:30:00 +0000">
  <MetadataEntry key="HKIndoorWorkout" value="0"/>
  <MetadataEntry key="HKElevationAscended" value="500 cm"/>
  <MetadataEntry key="HKElevationAscended" value="900 cm"/>
  <WorkoutStatistics type="HKQuantityTypeIdentifierHeartRate" average="150" minimum="120" maximum="180"/>
  <WorkoutRoute sourceName="Apple Watch">
   <FileReference path="/workout-routes/route_2024-01-15_10.00am.gpx"/>
  </WorkoutRoute>
 </Workout>
 <Workout workoutActivityType="HKWorkoutActivityTypeWalking" duration="45" sourceName="Strava" startDate="2024-01-16 14:00:00 +0000" endDate="2024-01-16 14:45:00 +0000"/>
 <Wrapper>
  <Workout workoutActivityType="HKWorkoutActivityTypeCycling" sourceName="Bharat's iPhone" startDate="2024-01-17 07:00:00 +0100" endDate="2024-01-17 08:00:00 +0100">
   <FileReference path="/workout-routes/not-in-a-route.gpx"/>
  </Workout>
 </Wrapper>
</HealthData>
"#;

    #[test]
    fn test_reads_workouts_at_any_depth() {
        let entries = read_workout_entries_str(ARCHIVE).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].source_name, "Strava");
        assert_eq!(entries[2].activity_type, "HKWorkoutActivityTypeCycling");
        assert!(entries[2].duration.is_none());
    }

    #[test]
    fn test_collects_children() {
        let entries = read_workout_entries_str(ARCHIVE).unwrap();
        let running = &entries[0];

        assert_eq!(running.statistics.len(), 1);
        assert_eq!(running.statistics[0].average.as_deref(), Some("150"));
        assert_eq!(running.elevation_ascended.as_deref(), Some("500 cm"));
        assert_eq!(
            running.route_reference.as_deref(),
            Some("/workout-routes/route_2024-01-15_10.00am.gpx")
        );
    }

    #[test]
    fn test_file_reference_outside_route_is_ignored() {
        let entries = read_workout_entries_str(ARCHIVE).unwrap();
        assert!(entries[2].route_reference.is_none());
    }

    #[test]
    fn test_elevation_without_value_defaults() {
        let content = r#"<HealthData><Workout><MetadataEntry key="HKElevationAscended"/></Workout></HealthData>"#;
        let entries = read_workout_entries_str(content).unwrap();
        assert_eq!(entries[0].elevation_ascended.as_deref(), Some("0 cm"));
    }

    #[test]
    fn test_select_filters_by_source() {
        let extractor = WorkoutExtractor::for_export_dir(SourceConfig::default(), "/export");
        let extraction = extractor.select(read_workout_entries_str(ARCHIVE).unwrap());

        assert_eq!(extraction.total_entries, 3);
        assert_eq!(extraction.matched_entries, 2);
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].sport, SportCategory::Running);
        assert_eq!(extraction.records[1].sport, SportCategory::Biking);
        assert_eq!(
            extraction.records[0].track_file.as_deref(),
            Some(Path::new(
                "/export/workout-routes/route_2024-01-15_10.00am.gpx"
            ))
        );
    }

    #[test]
    fn test_select_isolates_malformed_entries() {
        let content = r#"<HealthData>
  <Workout sourceName="Apple Watch" duration="abc" startDate="2024-01-15 10:00:00 +0000" endDate="2024-01-15 10:30:00 +0000"/>
  <Workout sourceName="Apple Watch" startDate="2024-01-16 10:00:00 +0000"/>
  <Workout sourceName="Apple Watch" startDate="2024-01-17 10:00:00 +0000" endDate="2024-01-17 10:30:00 +0000"/>
</HealthData>"#;

        let extractor = WorkoutExtractor::for_export_dir(SourceConfig::default(), "/export");
        let extraction = extractor.select(read_workout_entries_str(content).unwrap());

        assert_eq!(extraction.matched_entries, 3);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.incomplete_entries, 1);
        assert_eq!(extraction.rejected.len(), 1);
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        for content in [
            "",
            "<HealthData><Workout></HealthData>",
            "<HealthData><Workout>",
            "<HealthData/><HealthData/>",
            "<HealthData/>trailing",
        ] {
            assert!(read_workout_entries_str(content).is_err(), "{content:?}");
        }
    }

    #[test]
    fn test_extract_missing_archive_is_fatal() {
        let extractor = WorkoutExtractor::for_export_dir(SourceConfig::default(), "/no/such/export");
        let err = extractor.extract_all(&extractor.archive_path()).unwrap_err();
        assert!(matches!(err, HealthTcxError::ArchiveParse(_)));
        assert!(err.is_fatal());
    }
}
