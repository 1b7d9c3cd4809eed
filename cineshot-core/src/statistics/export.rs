//! Report assembly and CSV/JSON export.
//!
//! The CSV layout keeps one file per series so the output loads directly
//! into plotting tools; the JSON report carries everything in one document
//! for machine consumption.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classification::ShotType;
use crate::error::{CoreError, CoreResult};
use crate::statistics::{FilmStatistics, FilmSummary, ProbSample, StatsConfig, TypeSample, ValueSample};

/// Complete analysis output for one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmReport {
    /// Path of the analyzed input
    pub input: String,
    /// Statistics configuration the run used
    pub config: StatsConfig,
    pub summary: FilmSummary,
    pub prob_series: Vec<ProbSample>,
    pub shot_type_series: Vec<TypeSample>,
    pub entropy_series: Vec<ValueSample>,
    pub entropy_variance_series: Vec<ValueSample>,
    /// Timestamps (ms) of detected cuts
    pub cuts: Vec<f64>,
}

impl FilmStatistics {
    /// Consumes the evaluator and assembles the final report.
    pub fn into_report(self, input: &Path) -> FilmReport {
        FilmReport {
            input: input.display().to_string(),
            summary: self.summary(),
            config: self.config().clone(),
            prob_series: self.prob_series().to_vec(),
            shot_type_series: self.shot_type_series().to_vec(),
            entropy_series: self.entropy_series().to_vec(),
            entropy_variance_series: self.entropy_variance_series().to_vec(),
            cuts: self.cuts().to_vec(),
        }
    }
}

impl FilmReport {
    /// Writes the full report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> CoreResult<()> {
        let file = File::create(path)
            .map_err(|e| CoreError::Export(format!("cannot create {}: {e}", path.display())))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| CoreError::Export(format!("cannot write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Writes one CSV file per non-empty series into `dir`, plus the
    /// summary. Returns the paths written.
    pub fn write_csv_files(&self, dir: &Path) -> CoreResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .map_err(|e| CoreError::Export(format!("cannot create {}: {e}", dir.display())))?;
        let mut written = Vec::new();

        if !self.shot_type_series.is_empty() {
            let path = dir.join("shot_types.csv");
            let mut w = csv_writer(&path)?;
            write_line(&mut w, &path, "timestamp_ms,shot_type")?;
            for sample in &self.shot_type_series {
                write_line(
                    &mut w,
                    &path,
                    &format!("{:.3},{}", sample.timestamp_ms, sample.shot_type),
                )?;
            }
            written.push(path);
        }

        if !self.prob_series.is_empty() {
            let path = dir.join("probabilities.csv");
            let mut w = csv_writer(&path)?;
            let header: Vec<String> = std::iter::once("timestamp_ms".to_string())
                .chain(ShotType::ALL.iter().map(|t| t.to_string()))
                .collect();
            write_line(&mut w, &path, &header.join(","))?;
            for sample in &self.prob_series {
                let mut fields = vec![format!("{:.3}", sample.timestamp_ms)];
                for shot_type in ShotType::ALL {
                    let p = sample.probabilities.get(&shot_type).copied().unwrap_or(0.0);
                    fields.push(format!("{p:.6}"));
                }
                write_line(&mut w, &path, &fields.join(","))?;
            }
            written.push(path);
        }

        for (name, series) in [
            ("entropy.csv", &self.entropy_series),
            ("entropy_variance.csv", &self.entropy_variance_series),
        ] {
            if series.is_empty() {
                continue;
            }
            let path = dir.join(name);
            let mut w = csv_writer(&path)?;
            write_line(&mut w, &path, "timestamp_ms,value")?;
            for sample in series.iter() {
                write_line(
                    &mut w,
                    &path,
                    &format!("{:.3},{:.6}", sample.timestamp_ms, sample.value),
                )?;
            }
            written.push(path);
        }

        if !self.cuts.is_empty() {
            let path = dir.join("cuts.csv");
            let mut w = csv_writer(&path)?;
            write_line(&mut w, &path, "timestamp_ms")?;
            for cut in &self.cuts {
                write_line(&mut w, &path, &format!("{cut:.3}"))?;
            }
            written.push(path);
        }

        let path = dir.join("summary.csv");
        let mut w = csv_writer(&path)?;
        write_line(&mut w, &path, "shot_type,count,percentage")?;
        for shot_type in ShotType::ALL {
            let count = self
                .summary
                .shot_counts
                .get(&shot_type)
                .copied()
                .unwrap_or(0);
            write_line(
                &mut w,
                &path,
                &format!(
                    "{shot_type},{count},{:.2}",
                    self.summary.percentage(shot_type)
                ),
            )?;
        }
        written.push(path);

        Ok(written)
    }
}

fn csv_writer(path: &Path) -> CoreResult<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| CoreError::Export(format!("cannot create {}: {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn write_line(w: &mut BufWriter<File>, path: &Path, line: &str) -> CoreResult<()> {
    writeln!(w, "{line}")
        .map_err(|e| CoreError::Export(format!("cannot write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_report() -> FilmReport {
        let mut probabilities = BTreeMap::new();
        probabilities.insert(ShotType::Wide, 0.75);
        probabilities.insert(ShotType::Medium, 0.25);

        let mut shot_counts = BTreeMap::new();
        shot_counts.insert(ShotType::Wide, 3);

        FilmReport {
            input: "film.mp4".to_string(),
            config: StatsConfig::default(),
            summary: FilmSummary::new(4, 3, shot_counts, 1, Some(0.5)),
            prob_series: vec![ProbSample {
                timestamp_ms: 1000.0,
                probabilities,
            }],
            shot_type_series: vec![TypeSample {
                timestamp_ms: 1000.0,
                shot_type: ShotType::Wide,
            }],
            entropy_series: vec![ValueSample {
                timestamp_ms: 1000.0,
                value: 0.811,
            }],
            entropy_variance_series: vec![],
            cuts: vec![2000.0],
        }
    }

    #[test]
    fn csv_export_writes_non_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let written = sample_report().write_csv_files(dir.path()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(names.contains(&"shot_types.csv".to_string()));
        assert!(names.contains(&"probabilities.csv".to_string()));
        assert!(names.contains(&"entropy.csv".to_string()));
        assert!(names.contains(&"cuts.csv".to_string()));
        assert!(names.contains(&"summary.csv".to_string()));
        // Empty series produce no file.
        assert!(!names.contains(&"entropy_variance.csv".to_string()));

        let shot_types = fs::read_to_string(dir.path().join("shot_types.csv")).unwrap();
        assert_eq!(shot_types, "timestamp_ms,shot_type\n1000.000,wide\n");

        let probs = fs::read_to_string(dir.path().join("probabilities.csv")).unwrap();
        let mut lines = probs.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp_ms,close-up,medium,wide,unknown"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1000.000,0.000000,0.250000,0.750000,0.000000"
        );
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = sample_report();
        report.write_json(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let back: FilmReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.input, "film.mp4");
        assert_eq!(back.summary.cut_count, 1);
        assert_eq!(back.shot_type_series.len(), 1);
        assert_eq!(back.cuts, vec![2000.0]);
    }
}
