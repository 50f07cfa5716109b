//! Shared fixtures: a small unpacked Health export in a temporary directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<HealthData>
    <ExportDate value="2024-01-01 12:00:00 +0000"/>
    <Me HKCharacteristicTypeIdentifierDateOfBirth="1990-01-01"
        HKCharacteristicTypeIdentifierBiologicalSex="HKBiologicalSexMale"/>

    <Workout workoutActivityType="HKWorkoutActivityTypeRunning"
             duration="30.0" durationUnit="min"
             sourceName="Bharat's Apple Watch" sourceVersion="10.0"
             creationDate="2024-01-15 10:30:00 +0000"
             startDate="2024-01-15 10:00:00 +0000"
             endDate="2024-01-15 10:30:00 +0000">
        <MetadataEntry key="HKIndoorWorkout" value="0"/>
        <MetadataEntry key="HKElevationAscended" value="500 cm"/>
        <WorkoutStatistics type="HKQuantityTypeIdentifierHeartRate"
                          startDate="2024-01-15 10:00:00 +0000"
                          endDate="2024-01-15 10:30:00 +0000"
                          average="150" minimum="120" maximum="180" unit="count/min"/>
        <WorkoutStatistics type="HKQuantityTypeIdentifierDistanceWalkingRunning"
                          startDate="2024-01-15 10:00:00 +0000"
                          endDate="2024-01-15 10:30:00 +0000"
                          sum="5.0" unit="km"/>
        <WorkoutStatistics type="HKQuantityTypeIdentifierActiveEnergyBurned"
                          startDate="2024-01-15 10:00:00 +0000"
                          endDate="2024-01-15 10:30:00 +0000"
                          sum="300" unit="Cal"/>
        <WorkoutRoute sourceName="Bharat's Apple Watch" sourceVersion="10.0">
            <FileReference path="/workout-routes/route_2024-01-15_10.00am.gpx"/>
        </WorkoutRoute>
    </Workout>

    <Workout workoutActivityType="HKWorkoutActivityTypeWalking"
             duration="45.0" durationUnit="min"
             sourceName="Bharat's Apple Watch" sourceVersion="10.0"
             startDate="2024-01-16 13:15:00 +0000"
             endDate="2024-01-16 14:00:00 +0000">
        <MetadataEntry key="HKIndoorWorkout" value="0"/>
        <WorkoutStatistics type="HKQuantityTypeIdentifierDistanceWalkingRunning"
                          sum="3.0" unit="km"/>
        <WorkoutRoute sourceName="Bharat's Apple Watch" sourceVersion="10.0">
            <FileReference path="/workout-routes/route_2024-01-16_1.15pm.gpx"/>
        </WorkoutRoute>
    </Workout>

    <Workout workoutActivityType="HKWorkoutActivityTypeRunning"
             duration="25.0" durationUnit="min"
             sourceName="Strava" sourceVersion="1.0"
             startDate="2024-01-17 09:00:00 +0000"
             endDate="2024-01-17 09:25:00 +0000">
    </Workout>
</HealthData>
"#;

pub const ROUTE_FILE: &str = "route_2024-01-15_10.00am.gpx";

pub const ROUTE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="Apple Health Export" xmlns="http://www.topografix.com/GPX/1/1">
    <trk>
        <name>Route 2024-01-15 10:00am</name>
        <trkseg>
            <trkpt lon="-2.60000" lat="51.44000">
                <ele>100.0</ele>
                <time>2024-01-15T10:00:00Z</time>
                <extensions><speed>3.0</speed><course>45.0</course></extensions>
            </trkpt>
            <trkpt lon="-2.59950" lat="51.44050">
                <ele>101.0</ele>
                <time>2024-01-15T10:00:10Z</time>
                <extensions><speed>3.2</speed><course>47.0</course></extensions>
            </trkpt>
            <trkpt lon="-2.59900" lat="51.44100">
                <ele>102.0</ele>
                <time>2024-01-15T10:00:20Z</time>
                <extensions><speed>2.8</speed><course>43.0</course></extensions>
            </trkpt>
        </trkseg>
    </trk>
</gpx>
"#;

/// A temporary directory holding `export/export.xml` and `export/workout-routes/`
pub struct ExportFixture {
    pub temp_dir: TempDir,
}

impl ExportFixture {
    /// The standard three-workout export with one route file
    pub fn new() -> Self {
        Self::with_archive(EXPORT_XML)
    }

    /// An export with the given archive content and the standard route file
    pub fn with_archive(archive: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let fixture = Self { temp_dir };

        fs::create_dir_all(fixture.routes_dir()).unwrap();
        fs::write(fixture.archive_path(), archive).unwrap();
        fs::write(fixture.routes_dir().join(ROUTE_FILE), ROUTE_GPX).unwrap();
        fixture
    }

    pub fn export_dir(&self) -> PathBuf {
        self.temp_dir.path().join("export")
    }

    pub fn archive_path(&self) -> PathBuf {
        self.export_dir().join("export.xml")
    }

    pub fn routes_dir(&self) -> PathBuf {
        self.export_dir().join("workout-routes")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.temp_dir.path().join("tcx_output")
    }
}

/// All files with the given extension below `dir`, sorted
pub fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                found.extend(files_with_extension(&path, extension));
            } else if path.extension().is_some_and(|ext| ext == extension) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}
