use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Column, Observation, ObservationTable};

/// Fields per light curve line: time, magnitude, error, seeing, sky level.
pub const FIELDS_PER_LINE: usize = 5;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("light curve file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("{}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Any failure to open or read the file means it is not a readable light
/// curve; undecodable contents are a parse failure.
fn read_error(path: &Path, e: std::io::Error) -> LoadError {
    match e.kind() {
        std::io::ErrorKind::InvalidData => LoadError::Parse {
            path: path.to_path_buf(),
            line: 1,
            reason: e.to_string(),
        },
        _ => {
            log::debug!("{} is not readable: {e}", path.display());
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        }
    }
}

/// 1-based line containing byte `offset`.
fn line_of_offset(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset.min(bytes.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

fn csv_error(path: &Path, e: csv::Error) -> LoadError {
    if let csv::ErrorKind::Io(io) = e.kind() {
        if io.kind() != std::io::ErrorKind::InvalidData {
            return LoadError::NotFound {
                path: path.to_path_buf(),
            };
        }
    }
    LoadError::Parse {
        path: path.to_path_buf(),
        line: e.position().map_or(1, |p| p.line() as usize),
        reason: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a light curve from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – header row naming the five columns, comma separated
/// * anything else – whitespace-delimited text, five columns per line,
///   `time magnitude magnitude_error seeing sky_level`, no header
pub fn load(path: &Path) -> Result<ObservationTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        _ => load_text(path)?,
    };

    if table.is_empty() {
        log::warn!("{} contains no observations", path.display());
    } else {
        log::info!(
            "Loaded {} observations from {}",
            table.len(),
            path.display()
        );
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Whitespace-delimited text loader
// ---------------------------------------------------------------------------

/// Blank lines and lines starting with `#` are skipped; every other line
/// must hold exactly five numbers separated by spaces or tabs.
fn load_text(path: &Path) -> Result<ObservationTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(e) => {
            return Err(LoadError::Parse {
                path: path.to_path_buf(),
                line: line_of_offset(&bytes, e.valid_up_to()),
                reason: format!("invalid UTF-8: {e}"),
            })
        }
    };

    let rows = parse_text(text).map_err(|(line, reason)| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    })?;

    Ok(ObservationTable::new(rows, path))
}

/// Parse the body of a text light curve. Errors carry the 1-based line number.
/// A leading byte-order mark is ignored.
pub fn parse_text(text: &str) -> Result<Vec<Observation>, (usize, String)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            log::debug!("skipping line {line_no}");
            continue;
        }
        let fields = parse_line(trimmed).map_err(|reason| (line_no, reason))?;
        rows.push(Observation::from_fields(fields));
    }

    Ok(rows)
}

/// Split one data line into exactly five numbers.
pub fn parse_line(line: &str) -> Result<[f64; FIELDS_PER_LINE], String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_LINE {
        return Err(format!(
            "expected {FIELDS_PER_LINE} fields, found {}",
            tokens.len()
        ));
    }

    let mut fields = [0.0; FIELDS_PER_LINE];
    for (j, tok) in tokens.iter().enumerate() {
        fields[j] = parse_number(tok, j)?;
    }
    Ok(fields)
}

fn parse_number(tok: &str, field: usize) -> Result<f64, String> {
    tok.parse::<f64>().map_err(|_| {
        format!(
            "{} field '{tok}' is not a number",
            Column::ALL[field]
        )
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming every column (see [`Column::aliases`]),
/// one observation per record. Column order is free.
fn load_csv(path: &Path) -> Result<ObservationTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect();

    let mut positions = [0usize; FIELDS_PER_LINE];
    for col in Column::ALL {
        positions[col.index()] = headers
            .iter()
            .position(|h| col.aliases().contains(&h.as_str()))
            .ok_or_else(|| LoadError::Parse {
                path: path.to_path_buf(),
                line: 1,
                reason: format!("CSV header has no {col} column"),
            })?;
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        // Header is line 1; fall back to the record count if position is unknown.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);

        let mut fields = [0.0; FIELDS_PER_LINE];
        for (j, &pos) in positions.iter().enumerate() {
            let tok = record.get(pos).unwrap_or("");
            fields[j] = parse_number(tok, j).map_err(|reason| LoadError::Parse {
                path: path.to_path_buf(),
                line,
                reason,
            })?;
        }
        rows.push(Observation::from_fields(fields));
    }

    Ok(ObservationTable::new(rows, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp light curve file with the given suffix
    fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_text_row_count_matches_lines() {
        let content = "2455260.85336 19.799 0.117 4.67 685.0\n\
                       2455261.80012 19.712 0.104 3.98 702.5\n\
                       2455262.79120 19.845 0.121 5.10 690.1\n";
        let file = create_temp_file(content, ".dat");

        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_relative_eq!(table.rows()[1].magnitude, 19.712);
        assert_relative_eq!(table.rows()[2].sky_level, 690.1);
        assert_eq!(table.source(), file.path());
    }

    #[test]
    fn test_load_parses_example_line() {
        let file = create_temp_file("2455260.85336 19.799 0.117 4.67 685.0\n", ".dat");
        let table = load(file.path()).unwrap();
        let obs = table.rows()[0];
        assert_eq!(obs.time, 2455260.85336);
        assert_eq!(obs.magnitude, 19.799);
        assert_eq!(obs.magnitude_error, 0.117);
        assert_eq!(obs.seeing, 4.67);
        assert_eq!(obs.sky_level, 685.0);
    }

    #[test]
    fn test_load_rejects_short_line() {
        let file = create_temp_file(
            "2455260.85336 19.799 0.117 4.67 685.0\n2455260.85336 19.799\n",
            ".dat",
        );
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 2"), "reason was {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_extra_field() {
        let file = create_temp_file("1 2 3 4 5 6\n", ".dat");
        assert!(matches!(
            load(file.path()),
            Err(LoadError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_rejects_non_numeric_token() {
        let file = create_temp_file("2455260.85 19.7 abc 4.67 685.0\n", ".dat");
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("magnitude error"));
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = load(Path::new("missing.dat")).unwrap_err();
        assert!(
            matches!(err, LoadError::NotFound { .. }),
            "expected not found, got {err:?}"
        );
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let content = "# HJD mag err seeing sky\n\
                       \n\
                       \t2455260.85336   19.799\t0.117 4.67 685.0  \n\
                       \n\
                       2455261.80012 19.712 0.104 3.98 702.5\n";
        let rows = parse_text(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, 2455260.85336);
    }

    #[test]
    fn test_parse_error_reports_physical_line() {
        let content = "# header\n\n1 2 3 4 5\n1 2 3\n";
        let (line, _) = parse_text(content).unwrap_err();
        assert_eq!(line, 4);
    }

    #[test]
    fn test_empty_file_gives_empty_table() {
        let file = create_temp_file("", ".dat");
        let table = load(file.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_csv_with_reordered_header() {
        let content = "mag,HJD,mag_err,sky,seeing\n\
                       19.799,2455260.85336,0.117,685.0,4.67\n\
                       19.712,2455261.80012,0.104,702.5,3.98\n";
        let file = create_temp_file(content, ".csv");

        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let obs = table.rows()[0];
        assert_eq!(obs.time, 2455260.85336);
        assert_eq!(obs.magnitude, 19.799);
        assert_eq!(obs.seeing, 4.67);
        assert_eq!(obs.sky_level, 685.0);
    }

    #[test]
    fn test_load_csv_missing_column() {
        let file = create_temp_file("time,mag,err\n1,2,3\n", ".csv");
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("seeing"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_csv_bad_value() {
        let file = create_temp_file("time,mag,err,seeing,sky\n1,2,x,4,5\n", ".csv");
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error_with_line() {
        let mut file = tempfile::Builder::new().suffix(".dat").tempfile().unwrap();
        file.write_all(b"2455260.85336 19.799 0.117 4.67 685.0\n\xff\xfe 1 2 3 4\n")
            .unwrap();
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"), "reason was {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_file_maps_to_not_found() {
        let path = Path::new("locked.dat");
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(matches!(
            read_error(path, denied),
            LoadError::NotFound { .. }
        ));
        let garbled = std::io::Error::from(std::io::ErrorKind::InvalidData);
        assert!(matches!(
            read_error(path, garbled),
            LoadError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_load_csv_invalid_utf8_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"time,mag,err,seeing,sky\n1,2,3,4,5\n1,\xff,3,4,5\n")
            .unwrap();
        match load(file.path()).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let file = create_temp_file("\u{feff}2455260.85336 19.799 0.117 4.67 685.0\n", ".dat");
        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].time, 2455260.85336);

        let csv = create_temp_file("\u{feff}time,mag,err,seeing,sky\n1,2,3,4,5\n", ".csv");
        assert_eq!(load(csv.path()).unwrap().len(), 1);
    }
}
