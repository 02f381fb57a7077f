//! Reader and writer for catalog snapshot files.
//!
//! A snapshot is a JSON array of movie records:
//!
//! ```json
//! [
//!   {
//!     "id": 603,
//!     "title": "The Matrix",
//!     "overview": "...",
//!     "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
//!     "genres": ["Action", "Science Fiction"],
//!     "director": "Lana Wachowski",
//!     "actors": ["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"]
//!   }
//! ]
//! ```
//!
//! A missing `director` becomes "Unknown". Loading rejects duplicate ids,
//! repeated genres inside one record and more than three actors.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Load and validate a snapshot file
pub fn parse_catalog(path: &Path) -> Result<Vec<MovieRecord>> {
    let file_label = path.display().to_string();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: file_label.clone(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let records: Vec<MovieRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| DataLoadError::ParseError {
            file: file_label.clone(),
            source,
        })?;

    validate_catalog(&records, &file_label)?;
    tracing::info!("Loaded {} movies from {}", records.len(), file_label);
    Ok(records)
}

/// Parse a snapshot held in memory. `label` only appears in error messages.
pub fn parse_catalog_str(json: &str, label: &str) -> Result<Vec<MovieRecord>> {
    let records: Vec<MovieRecord> =
        serde_json::from_str(json).map_err(|source| DataLoadError::ParseError {
            file: label.to_string(),
            source,
        })?;
    validate_catalog(&records, label)?;
    Ok(records)
}

/// Write records as a pretty-printed snapshot, replacing any existing file
pub fn write_catalog(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
        DataLoadError::ParseError {
            file: path.display().to_string(),
            source,
        }
    })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Wrote {} movies to {}", records.len(), path.display());
    Ok(())
}

/// Check the whole snapshot: ids unique, every record well formed
fn validate_catalog(records: &[MovieRecord], file: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(DataLoadError::DuplicateId {
                file: file.to_string(),
                id: record.id,
            });
        }
        validate_record(record)?;
    }
    Ok(())
}

/// Per-record rules shared by the snapshot reader and fetchers
pub fn validate_record(record: &MovieRecord) -> Result<()> {
    if record.actors.len() > MAX_ACTORS {
        return Err(DataLoadError::InvalidRecord {
            id: record.id,
            reason: format!(
                "{} actors listed, at most {} allowed",
                record.actors.len(),
                MAX_ACTORS
            ),
        });
    }

    let mut genres = HashSet::new();
    for genre in &record.genres {
        if !genres.insert(genre.as_str()) {
            return Err(DataLoadError::InvalidRecord {
                id: record.id,
                reason: format!("genre '{}' listed twice", genre),
            });
        }
    }

    if record.director.trim().is_empty() {
        return Err(DataLoadError::InvalidRecord {
            id: record.id,
            reason: "empty director name (use \"Unknown\")".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "poster_path": "/matrix.jpg",
            "genres": ["Action", "Science Fiction"],
            "director": "Lana Wachowski",
            "actors": ["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"]
        },
        {
            "id": 862,
            "title": "Toy Story",
            "genres": ["Animation", "Comedy", "Family"]
        }
    ]"#;

    #[test]
    fn test_parse_sample_catalog() {
        let records = parse_catalog_str(SAMPLE, "sample").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 603);
        assert_eq!(records[0].actors.len(), 3);
        assert_eq!(records[0].poster_path.as_deref(), Some("/matrix.jpg"));
    }

    #[test]
    fn test_missing_director_defaults_to_unknown() {
        let records = parse_catalog_str(SAMPLE, "sample").unwrap();
        assert_eq!(records[1].director, UNKNOWN_DIRECTOR);
        assert!(!records[1].has_known_director());
        assert!(records[1].actors.is_empty());
        assert!(records[1].overview.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": 1, "title": "A"}, {"id": 1, "title": "B"}]"#;
        let err = parse_catalog_str(json, "dupes").unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn test_too_many_actors_rejected() {
        let json = r#"[{"id": 7, "title": "Crowded", "actors": ["a", "b", "c", "d"]}]"#;
        let err = parse_catalog_str(json, "actors").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidRecord { id: 7, .. }));
    }

    #[test]
    fn test_repeated_genre_rejected() {
        let json = r#"[{"id": 9, "title": "Twice", "genres": ["Drama", "Drama"]}]"#;
        assert!(parse_catalog_str(json, "genres").is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_catalog_str("{not json", "broken").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
    }

    #[test]
    fn test_write_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let records = parse_catalog_str(SAMPLE, "sample").unwrap();

        write_catalog(&path, &records).unwrap();
        let loaded = parse_catalog(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
