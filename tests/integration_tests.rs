use movie_disconnect::analyzers::aggregate::summarize;
use movie_disconnect::analyzers::report::build_report;
use movie_disconnect::analyzers::select::{audiences_favor, critics_favor};
use movie_disconnect::analyzers::types::{GroupKey, GroupLabel};
use movie_disconnect::config::PipelineConfig;
use movie_disconnect::error::DataLoadError;
use movie_disconnect::loader::{load_records, read_records};
use movie_disconnect::pipeline::build_dataset;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/movies.csv");

#[test]
fn test_full_pipeline() {
    let records = load_records(FIXTURE).expect("Failed to load fixture");
    assert_eq!(records.len(), 7);

    let dataset = build_dataset(records, &PipelineConfig::default());

    // documentary, uncounted and genreless rows are gone; Alpha beats Gamma on critic count
    let titles: Vec<&str> = dataset.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Beta", "Alpha", "Gamma", "Zeta"]);

    let alpha = &dataset.records()[1];
    assert_eq!(alpha.primary_genre, "Drama");
    assert_eq!(alpha.release_decade, Some(1990));
    assert_eq!(alpha.critical_disconnect, Some(40.0));
    assert_eq!(alpha.title_with_year, "Alpha (1994)");

    let zeta = &dataset.records()[3];
    assert_eq!(zeta.release_decade, None);
    assert_eq!(zeta.title_with_year, "Zeta");
}

#[test]
fn test_disconnect_rankings_on_fixture() {
    let records = load_records(FIXTURE).unwrap();
    let dataset = build_dataset(records, &PipelineConfig::default());

    assert_eq!(critics_favor(&dataset, 1)[0].title, "Alpha");
    assert_eq!(audiences_favor(&dataset, 1)[0].title, "Beta");
}

#[test]
fn test_grouping_on_fixture() {
    let records = load_records(FIXTURE).unwrap();
    let dataset = build_dataset(records, &PipelineConfig::default());

    let genres = summarize(&dataset, GroupKey::Genre, 1);
    let comedy = genres
        .iter()
        .find(|g| g.group == GroupLabel::Genre("Comedy".to_string()))
        .unwrap();
    // undated Zeta still counts towards its genre
    assert_eq!(comedy.count, 2);

    let decades = summarize(&dataset, GroupKey::Decade, 1);
    let total: usize = decades.iter().map(|d| d.count).sum();
    assert_eq!(total, 3);

    assert!(summarize(&dataset, GroupKey::Genre, 100).is_empty());
}

#[test]
fn test_limit_truncates_fixture() {
    let records = load_records(FIXTURE).unwrap();
    let config = PipelineConfig {
        limit: 2,
        ..PipelineConfig::default()
    };

    let dataset = build_dataset(records, &config);
    let report = build_report(&dataset, &config);

    assert_eq!(dataset.len(), 2);
    assert_eq!(report.dataset_size, 2);
}

#[test]
fn test_schema_mismatch_is_fatal() {
    let err = read_records("title,score\nAlpha,90\n".as_bytes()).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingColumns { .. }));
    assert!(err.to_string().contains("movie_title"));
}

#[test]
fn test_nan_score_is_missing_and_never_ranked() {
    let csv = "rotten_tomatoes_link,movie_title,movie_info,content_rating,genres,original_release_date,tomatometer_rating,tomatometer_count,audience_rating,audience_count
m/a,A,,PG,Drama,2000-01-01,90,10,50,300
m/b,B,,PG,Drama,2000-01-01,NaN,10,50,200
";
    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(records[1].critic_score, None);

    let dataset = build_dataset(records, &PipelineConfig::default());
    let top = critics_favor(&dataset, 2);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].title, "A");
    assert_eq!(top[0].critical_disconnect, Some(40.0));

    let genres = summarize(&dataset, GroupKey::Genre, 1);
    assert_eq!(genres[0].mean_critical_disconnect, Some(40.0));
}
