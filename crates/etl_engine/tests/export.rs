use chrono::{TimeZone, Utc};
use etl_core::Launch;
use etl_engine::{
    fallback_launches, normalize_timestamp, to_delimited_text, write_csv_export, CsvColumn,
    EXPORT_COLUMNS,
};
use pretty_assertions::assert_eq;

fn quoted_launch() -> Launch {
    Launch {
        id: "demo-1".to_string(),
        name: "A\"B".to_string(),
        date_utc: Some("2025-01-01T00:00:00.000Z".to_string()),
        success: Some(true),
        upcoming: false,
        rocket: Some("F9".to_string()),
        launchpad: Some("LC-39A".to_string()),
        extra: Default::default(),
    }
}

#[test]
fn export_quotes_every_field_and_doubles_inner_quotes() {
    let text = to_delimited_text(&[quoted_launch()], &EXPORT_COLUMNS);
    assert_eq!(
        text,
        "id,name,date_utc,success,upcoming,rocket,launchpad\n\
         \"demo-1\",\"A\"\"B\",\"2025-01-01T00:00:00.000Z\",\"true\",\"false\",\"F9\",\"LC-39A\""
    );
}

#[test]
fn absent_values_render_as_empty_quoted_fields() {
    let launch = Launch {
        date_utc: None,
        success: None,
        rocket: None,
        ..quoted_launch()
    };
    let text = to_delimited_text(&[launch], &EXPORT_COLUMNS);
    let row = text.lines().nth(1).unwrap();
    assert_eq!(row, "\"demo-1\",\"A\"\"B\",\"\",\"\",\"false\",\"\",\"LC-39A\"");
}

#[test]
fn column_projection_is_respected() {
    let text = to_delimited_text(&fallback_launches(), &[CsvColumn::Name, CsvColumn::Upcoming]);
    assert_eq!(
        text,
        "name,upcoming\n\
         \"Demo Mission Alpha\",\"false\"\n\
         \"Demo Mission Beta\",\"false\"\n\
         \"Demo Mission Gamma\",\"true\""
    );
}

#[test]
fn empty_batch_exports_header_only() {
    assert_eq!(
        to_delimited_text(&[], &EXPORT_COLUMNS),
        "id,name,date_utc,success,upcoming,rocket,launchpad"
    );
}

#[test]
fn timestamps_are_normalized_to_utc_millis() {
    assert_eq!(
        normalize_timestamp("2025-01-01T00:00:00Z"),
        "2025-01-01T00:00:00.000Z"
    );
    assert_eq!(
        normalize_timestamp("2025-01-01T02:30:00+02:00"),
        "2025-01-01T00:30:00.000Z"
    );
    assert_eq!(
        normalize_timestamp("2025-01-01T10:00:00"),
        "2025-01-01T10:00:00.000Z"
    );
    assert_eq!(
        normalize_timestamp("2025-01-01T10:00:00.5"),
        "2025-01-01T10:00:00.500Z"
    );
    assert_eq!(normalize_timestamp("2025-01-01"), "2025-01-01T00:00:00.000Z");
    assert_eq!(normalize_timestamp("2025-13-01"), "2025-13-01");
    assert_eq!(normalize_timestamp("soon"), "soon");
}

#[test]
fn csv_export_is_written_to_timestamped_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let dir = temp.path().join("exports");
    let now = Utc.timestamp_millis_opt(1_735_689_600_123).unwrap();

    let summary = write_csv_export(&dir, &fallback_launches(), now).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.path, dir.join("mini-etl-1735689600123.csv"));
    let content = std::fs::read_to_string(&summary.path).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(content.contains("\"demo-2\",\"Demo Mission Beta\",\"2025-02-02T09:45:00.000Z\",\"false\""));
}
