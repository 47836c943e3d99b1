//! CSV loading for the movie export.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::DataLoadError;
use crate::record::{REQUIRED_COLUMNS, Record};

/// Reads every row of the CSV at `path`.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the file cannot be opened, the header is
/// missing any of [`REQUIRED_COLUMNS`], or a row is structurally malformed.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, DataLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    info!(rows = records.len(), "Loaded movie records");
    Ok(records)
}

/// Reads records from any CSV source, validating the header first.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DataLoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns { missing });
    }
    debug!(columns = headers.len(), "CSV header validated");

    // Rows are read as bytes so a bad encoding in one cell stays local to that cell.
    let header_bytes = rdr.byte_headers()?.clone();
    let mut records = Vec::new();
    for result in rdr.byte_records() {
        let row = result?;
        let record: Record = row.deserialize(Some(&header_bytes))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "rotten_tomatoes_link,movie_title,movie_info,critics_consensus,content_rating,genres,original_release_date,tomatometer_rating,tomatometer_count,audience_rating,audience_count\n";

    fn read(body: &str) -> Result<Vec<Record>, DataLoadError> {
        read_records(format!("{}{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_read_typed_row() {
        let rows = read(
            "m/heat,Heat,A heist.,Great.,R,\"Action & Adventure, Drama\",1995-12-15,87,74.0,94,250000.0\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.id, "m/heat");
        assert_eq!(r.title, "Heat");
        assert_eq!(r.synopsis.as_deref(), Some("A heist."));
        assert_eq!(r.genres.as_deref(), Some("Action & Adventure, Drama"));
        assert_eq!(r.release_date, NaiveDate::from_ymd_opt(1995, 12, 15));
        assert_eq!(r.critic_score, Some(87.0));
        assert_eq!(r.critic_count, Some(74));
        assert_eq!(r.audience_score, Some(94.0));
        assert_eq!(r.audience_count, Some(250000));
    }

    #[test]
    fn test_unparseable_cells_become_none() {
        let rows = read("m/x,X,,,,,not-a-date,n/a,,,abc\n").unwrap();

        let r = &rows[0];
        assert_eq!(r.synopsis, None);
        assert_eq!(r.genres, None);
        assert_eq!(r.release_date, None);
        assert_eq!(r.critic_score, None);
        assert_eq!(r.critic_count, None);
        assert_eq!(r.audience_score, None);
        assert_eq!(r.audience_count, None);
    }

    #[test]
    fn test_invalid_utf8_cell_does_not_fail_load() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"m/ok,Fine,Plain.,,PG,Drama,2001-01-01,70,10,60,100\n");
        bytes.extend_from_slice(b"m/caf\xe9,Caf\xe9,caf\xe9 story,,PG,Drama,2002-01-01,80,20,50,200\n");

        let rows = read_records(bytes.as_slice()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].synopsis.as_deref(), Some("Plain."));
        let r = &rows[1];
        assert_eq!(r.synopsis, None);
        assert_eq!(r.id, "m/caf\u{FFFD}");
        assert_eq!(r.title, "Caf\u{FFFD}");
        assert_eq!(r.genres.as_deref(), Some("Drama"));
        assert_eq!(r.critic_score, Some(80.0));
    }

    #[test]
    fn test_non_finite_scores_become_none() {
        let rows = read("m/x,X,,,,Drama,2001-01-01,NaN,10,inf,100\n").unwrap();

        assert_eq!(rows[0].critic_score, None);
        assert_eq!(rows[0].audience_score, None);
    }

    #[test]
    fn test_missing_columns_rejected() {
        let err = read_records("movie_title,genres\nHeat,Drama\n".as_bytes()).unwrap_err();

        match err {
            DataLoadError::MissingColumns { missing } => {
                assert!(missing.contains(&"rotten_tomatoes_link".to_string()));
                assert!(missing.contains(&"audience_count".to_string()));
                assert!(!missing.contains(&"genres".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = read("m/x,X\n").unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records("/definitely/not/here/movies.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("movies.csv"));
    }
}
