//! Flattening a record into display rows.

use crate::config::NOT_AVAILABLE;
use crate::record::GeoRecord;

/// One `(label, value)` pair.
pub type ExportRow = (String, String);

/// Flattens `record` into labelled rows in a fixed order.
///
/// Absent fields render as `N/A`. Provider-specific extras follow the common
/// fields, sorted by key.
pub fn record_rows(record: &GeoRecord) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = vec![
        row("Source", Some(record.source())),
        row("IP Address", Some(record.ip())),
        row("IP Version", Some(record.family().as_str())),
        row("City", record.city()),
        row("Region", record.region()),
        row("Country", record.country_name()),
        row("Country Code", record.country_code()),
        row("Postal Code", record.postal()),
        row("Latitude", record.latitude().map(|v| v.to_string()).as_deref()),
        row("Longitude", record.longitude().map(|v| v.to_string()).as_deref()),
        row("Timezone", record.timezone()),
        row("ISP", record.isp()),
        row("ASN", record.asn()),
    ];

    rows.extend(
        record
            .extra()
            .iter()
            .map(|(key, value)| (title_case(key), value.clone())),
    );
    rows
}

/// Picks the record to export: the one from `source` if given, else the first.
pub fn select_record<'a>(records: &'a [GeoRecord], source: Option<&str>) -> Option<&'a GeoRecord> {
    match source {
        Some(source) => records
            .iter()
            .find(|r| r.source().eq_ignore_ascii_case(source)),
        None => records.first(),
    }
}

fn row(label: &str, value: Option<&str>) -> ExportRow {
    (
        label.to_string(),
        value.unwrap_or(NOT_AVAILABLE).to_string(),
    )
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
