//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::models::{ParticipationRecord, PlayerStats, TournamentStats};

/// Derived outputs written by the `derive` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedKind {
    PlayerStats,
    TournamentStats,
}

impl DerivedKind {
    /// Get the filename for this output.
    pub fn filename(&self) -> &'static str {
        match self {
            DerivedKind::PlayerStats => "player_stats.jsonl",
            DerivedKind::TournamentStats => "tournament_stats.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a derived output.
    pub fn for_derived(config: &StorageConfig, kind: DerivedKind) -> Self {
        Self::new(config.derived_dir().join(kind.filename()))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", entities.len(), self.path);

        Ok(entities.len())
    }
}

/// JSONL file reader.
///
/// Reads are strict: a line that fails to parse aborts the read.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities from the file, skipping blank lines.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        self.iter()?.collect()
    }

    /// Create an iterator over the file.
    pub fn iter(&self) -> Result<JsonlIterator<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;

        Ok(JsonlIterator {
            path: self.path.clone(),
            reader: BufReader::new(file),
            line_num: 0,
            _marker: PhantomData,
        })
    }
}

/// Iterator over JSONL file entries.
pub struct JsonlIterator<T> {
    path: PathBuf,
    reader: BufReader<File>,
    line_num: usize,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Iterator for JsonlIterator<T> {
    type Item = Result<T, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_num += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(&line).map_err(|source| {
                        StorageError::MalformedLine {
                            path: self.path.clone(),
                            line: self.line_num,
                            source,
                        }
                    }));
                }
                Err(e) => return Some(Err(StorageError::Io(e))),
            }
        }
    }
}

/// Load participation records from a JSONL export.
pub fn read_participation(path: &Path) -> Result<Vec<ParticipationRecord>, StorageError> {
    let records = JsonlReader::new(path.to_path_buf()).read_all()?;
    debug!("Loaded {} participation records from {:?}", records.len(), path);
    Ok(records)
}

/// Write derived player and tournament stats, replacing previous output.
pub fn write_derived(
    config: &StorageConfig,
    players: &[PlayerStats],
    tournaments: &[TournamentStats],
) -> Result<(usize, usize), StorageError> {
    let players_written =
        JsonlWriter::for_derived(config, DerivedKind::PlayerStats).write_all(players)?;
    let tournaments_written =
        JsonlWriter::for_derived(config, DerivedKind::TournamentStats).write_all(tournaments)?;
    Ok((players_written, tournaments_written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TournamentId, TournamentRef};
    use chrono::{TimeZone, Utc};
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestEntity {
        id: String,
        value: u32,
    }

    fn entity(id: &str, value: u32) -> TestEntity {
        TestEntity {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.jsonl");
        let entities = vec![entity("1", 100), entity("2", 200)];

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&entities).unwrap(), 2);

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), entities);
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);

        writer.write_all(&[entity("old", 1)]).unwrap();
        writer.write_all(&[entity("a", 2), entity("b", 3)]).unwrap();

        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].id, "a");
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestEntity> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(matches!(
            reader.read_all(),
            Err(StorageError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_read_all_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.jsonl");
        std::fs::write(
            &path,
            "{\"id\":\"1\",\"value\":1}\n\n   \n{\"id\":\"2\",\"value\":2}\n",
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_read_all_fails_on_bad_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.jsonl");
        std::fs::write(
            &path,
            "{\"id\":\"1\",\"value\":1}\n\nnot-valid-json\n{\"id\":\"2\",\"value\":2}\n",
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        match reader.read_all() {
            Err(StorageError::MalformedLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed line error, got {:?}", other),
        }
    }

    #[test]
    fn test_derived_filenames() {
        assert_eq!(DerivedKind::PlayerStats.filename(), "player_stats.jsonl");
        assert_eq!(
            DerivedKind::TournamentStats.filename(),
            "tournament_stats.jsonl"
        );
    }

    #[test]
    fn test_read_participation_store_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("participants.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"name":"Ann","buy_ins":1,"place":1,"won_amount":80,"tournaments":{"id":"t1","created_at":"2025-06-01T19:00:00Z","buy_in":20,"prize_pool":80}}"#,
                "\n",
                r#"{"name":"Ben","buy_ins":2,"place":null,"won_amount":0,"tournaments":{"id":"t1","created_at":"2025-06-01T19:00:00Z","buy_in":20,"prize_pool":80}}"#,
                "\n",
            ),
        )
        .unwrap();

        let records = read_participation(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].player_name, "Ben");
        assert_eq!(records[1].spent(), 40.0);
    }

    #[test]
    fn test_read_participation_missing_tournament_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("participants.jsonl");
        std::fs::write(&path, "{\"name\":\"Ann\",\"buy_ins\":1,\"won_amount\":0}\n").unwrap();

        assert!(matches!(
            read_participation(&path),
            Err(StorageError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_write_derived() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let players = vec![PlayerStats::new("Ann".to_string())];
        let t = TournamentRef::new(
            "t1",
            Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap(),
            20.0,
            80.0,
        );
        let tournaments = vec![TournamentStats {
            id: TournamentId::from("t1"),
            date: t.created_at,
            participant_count: 4,
            prize_pool: t.prize_pool,
            name: None,
            currency: None,
        }];

        let (p, t) = write_derived(&config, &players, &tournaments).unwrap();
        assert_eq!((p, t), (1, 1));

        let read: Vec<TournamentStats> =
            JsonlReader::new(config.derived_dir().join("tournament_stats.jsonl"))
                .read_all()
                .unwrap();
        assert_eq!(read, tournaments);
    }
}
