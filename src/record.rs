//! Typed movie rows and the fields derived from them.

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::MissingFieldError;

/// Header names the loader requires, in source order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "rotten_tomatoes_link",
    "movie_title",
    "movie_info",
    "content_rating",
    "genres",
    "original_release_date",
    "tomatometer_rating",
    "tomatometer_count",
    "audience_rating",
    "audience_count",
];

/// One row of the source CSV.
///
/// Optional cells that are empty or fail to parse deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "rotten_tomatoes_link", deserialize_with = "lossy_string")]
    pub id: String,
    #[serde(rename = "movie_title", deserialize_with = "lossy_string")]
    pub title: String,
    #[serde(rename = "movie_info", default, deserialize_with = "csv::invalid_option")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub content_rating: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub genres: Option<String>,
    #[serde(
        rename = "original_release_date",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "tomatometer_rating", default, deserialize_with = "lenient_score")]
    pub critic_score: Option<f64>,
    #[serde(rename = "tomatometer_count", default, deserialize_with = "lenient_count")]
    pub critic_count: Option<u32>,
    #[serde(rename = "audience_rating", default, deserialize_with = "lenient_score")]
    pub audience_score: Option<f64>,
    #[serde(rename = "audience_count", default, deserialize_with = "lenient_count")]
    pub audience_count: Option<u32>,
}

/// Decodes a required text cell, replacing invalid UTF-8 with U+FFFD.
fn lossy_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LossyVisitor;

    impl<'de> Visitor<'de> for LossyVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a text cell")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<String, E> {
            Ok(String::from_utf8_lossy(v).into_owned())
        }
    }

    de.deserialize_bytes(LossyVisitor)
}

/// A score cell; `NaN` and infinities are treated as missing.
fn lenient_score<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.filter(|v| v.is_finite()))
}

/// Accepts `"254"` as well as `"254.0"`; anything that is not a whole,
/// non-negative number in range becomes `None`.
fn lenient_count<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.and_then(count_from_f64))
}

fn count_from_f64(v: f64) -> Option<u32> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

/// Returns the first entry of a comma-separated genre list.
///
/// ```
/// use movie_disconnect::record::primary_genre;
///
/// assert_eq!(primary_genre("Comedy, Drama").as_deref(), Some("Comedy"));
/// assert_eq!(primary_genre(""), None);
/// ```
pub fn primary_genre(genres: &str) -> Option<String> {
    genres
        .split(',')
        .next()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_owned)
}

/// A record that survived genre filtering, paired with its primary genre.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreRecord {
    pub record: Record,
    pub primary_genre: String,
}

/// A row of the working dataset with every derived column filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub title_with_year: String,
    pub primary_genre: String,
    pub genres: Option<String>,
    pub content_rating: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub release_decade: Option<i32>,
    pub critic_score: Option<f64>,
    pub critic_count: Option<u32>,
    pub audience_score: Option<f64>,
    pub audience_count: Option<u32>,
    pub critical_disconnect: Option<f64>,
    pub synopsis: Option<String>,
}

impl MovieRecord {
    /// Computes year, decade, disconnect and display title. Never fails.
    pub fn derive(genre_record: GenreRecord) -> Self {
        let GenreRecord {
            record,
            primary_genre,
        } = genre_record;

        let release_year = record.release_date.map(|d| d.year());
        let release_decade = release_year.map(decade_of);
        let critical_disconnect = match (record.critic_score, record.audience_score) {
            (Some(critic), Some(audience)) => Some(critic - audience),
            _ => None,
        };
        let title_with_year = match release_year {
            Some(year) => format!("{} ({})", record.title, year),
            None => record.title.clone(),
        };

        MovieRecord {
            id: record.id,
            title: record.title,
            title_with_year,
            primary_genre,
            genres: record.genres,
            content_rating: record.content_rating,
            release_date: record.release_date,
            release_year,
            release_decade,
            critic_score: record.critic_score,
            critic_count: record.critic_count,
            audience_score: record.audience_score,
            audience_count: record.audience_count,
            critical_disconnect,
            synopsis: record.synopsis,
        }
    }

    pub fn decade(&self) -> Result<i32, MissingFieldError> {
        self.release_decade.ok_or(MissingFieldError::ReleaseDate)
    }

    pub fn disconnect(&self) -> Result<f64, MissingFieldError> {
        match (self.critic_score, self.audience_score) {
            (None, _) => Err(MissingFieldError::CriticScore),
            (_, None) => Err(MissingFieldError::AudienceScore),
            (Some(_), Some(_)) => self
                .critical_disconnect
                .ok_or(MissingFieldError::CriticScore),
        }
    }
}

/// Floors a year to the start of its decade: 1994 → 1990.
pub fn decade_of(year: i32) -> i32 {
    year - year.rem_euclid(10)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn derived(record: Record) -> MovieRecord {
        let primary_genre = record
            .genres
            .as_deref()
            .and_then(primary_genre)
            .unwrap_or_default();
        MovieRecord::derive(GenreRecord {
            record,
            primary_genre,
        })
    }

    #[test]
    fn test_primary_genre_takes_first_token() {
        assert_eq!(
            primary_genre("Action & Adventure, Comedy").as_deref(),
            Some("Action & Adventure")
        );
        assert_eq!(primary_genre("  Horror ").as_deref(), Some("Horror"));
    }

    #[test]
    fn test_primary_genre_empty_inputs() {
        assert_eq!(primary_genre(""), None);
        assert_eq!(primary_genre("   "), None);
        assert_eq!(primary_genre(", Drama"), None);
    }

    #[test]
    fn test_count_from_f64() {
        assert_eq!(count_from_f64(254.0), Some(254));
        assert_eq!(count_from_f64(0.0), Some(0));
        assert_eq!(count_from_f64(2.5), None);
        assert_eq!(count_from_f64(-1.0), None);
        assert_eq!(count_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_decade_of() {
        assert_eq!(decade_of(1994), 1990);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(2019), 2010);
    }

    #[test]
    fn test_derive_fields() {
        let m = derived(movie("Heat", 87.0, 94.0, 1995));

        assert_eq!(m.release_year, Some(1995));
        assert_eq!(m.release_decade, Some(1990));
        assert_eq!(m.critical_disconnect, Some(-7.0));
        assert_eq!(m.title_with_year, "Heat (1995)");
        assert_eq!(m.primary_genre, "Drama");
    }

    #[test]
    fn test_derive_without_date() {
        let m = derived(undated(movie("Heat", 87.0, 94.0, 1995)));

        assert_eq!(m.release_year, None);
        assert_eq!(m.decade(), Err(MissingFieldError::ReleaseDate));
        assert_eq!(m.title_with_year, "Heat");
        assert_eq!(m.disconnect(), Ok(-7.0));
    }

    #[test]
    fn test_derive_without_score() {
        let mut record = movie("Heat", 87.0, 94.0, 1995);
        record.audience_score = None;
        let m = derived(record);

        assert_eq!(m.critical_disconnect, None);
        assert_eq!(m.disconnect(), Err(MissingFieldError::AudienceScore));
    }
}
