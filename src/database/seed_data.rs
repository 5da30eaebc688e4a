//! Bootstrap loader: fills empty tables from the NOC-region and event CSV files.
//!
//! Each table is checked on its own. A table that already holds any row is
//! skipped entirely, so repeated starts never duplicate data (and never
//! reconcile data that differs from the files either).

use csv::{ReaderBuilder, StringRecord};
use sea_orm::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::database::entities::{events, regions};
use crate::errors::{SeedError, SeedResult};

pub const REGION_COLUMNS: usize = 3;
pub const EVENT_COLUMNS: usize = 16;

const INSERT_CHUNK: usize = 50;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub regions_inserted: usize,
    pub events_inserted: usize,
}

pub async fn seed_from_csv(
    db: &DatabaseConnection,
    regions_csv: &Path,
    events_csv: &Path,
) -> SeedResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    if regions::Entity::find().one(db).await?.is_none() {
        info!("Loading regions from {}", regions_csv.display());
        let rows = parse_regions(open(regions_csv)?, &regions_csv.display().to_string())?;
        summary.regions_inserted = rows.len();

        let txn = db.begin().await?;
        for chunk in rows.chunks(INSERT_CHUNK) {
            regions::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
        }
        txn.commit().await?;
        info!("Inserted {} regions", summary.regions_inserted);
    } else {
        info!("Regions already present, skipping region seed data");
    }

    if events::Entity::find().one(db).await?.is_none() {
        info!("Loading events from {}", events_csv.display());
        let rows = parse_events(open(events_csv)?, &events_csv.display().to_string())?;
        summary.events_inserted = rows.len();

        let txn = db.begin().await?;
        for chunk in rows.chunks(INSERT_CHUNK) {
            events::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
        }
        txn.commit().await?;
        info!("Inserted {} events", summary.events_inserted);
    } else {
        info!("Events already present, skipping event seed data");
    }

    let unmatched = unmatched_event_nocs(db).await?;
    if !unmatched.is_empty() {
        warn!(
            "{} event NOC code(s) have no matching region: {}",
            unmatched.len(),
            unmatched.join(", ")
        );
    }

    Ok(summary)
}

/// Parses `NOC,region,notes` rows. Values are kept verbatim.
pub fn parse_regions<R: Read>(reader: R, source: &str) -> SeedResult<Vec<regions::ActiveModel>> {
    read_rows(reader, source, REGION_COLUMNS)?
        .iter()
        .map(|record| {
            Ok(regions::ActiveModel {
                noc: Set(record[0].to_string()),
                region: Set(record[1].to_string()),
                notes: Set(Some(record[2].to_string())),
            })
        })
        .collect()
}

/// Parses event rows in the column order
/// `type,year,country,host,NOC,start,end,duration,disabilities_included,
/// countries,events,sports,participants_m,participants_f,participants,highlights`.
///
/// Empty optional cells become `NULL`.
pub fn parse_events<R: Read>(reader: R, source: &str) -> SeedResult<Vec<events::ActiveModel>> {
    read_rows(reader, source, EVENT_COLUMNS)?
        .iter()
        .map(|record| {
            let row = CsvRow { record, source };
            Ok(events::ActiveModel {
                id: NotSet,
                event_type: Set(row.text(0)),
                year: Set(row.int(1, "year")?),
                country: Set(row.text(2)),
                host: Set(row.text(3)),
                noc: Set(row.text(4)),
                start: Set(row.optional_text(5)),
                end: Set(row.optional_text(6)),
                duration: Set(row.optional_int(7, "duration")?),
                disabilities_included: Set(row.optional_text(8)),
                countries: Set(row.optional_int(9, "countries")?),
                events: Set(row.optional_int(10, "events")?),
                sports: Set(row.optional_int(11, "sports")?),
                participants_m: Set(row.optional_int(12, "participants_m")?),
                participants_f: Set(row.optional_int(13, "participants_f")?),
                participants: Set(row.optional_int(14, "participants")?),
                highlights: Set(row.optional_text(15)),
            })
        })
        .collect()
}

/// Distinct event NOC codes that have no region row.
pub async fn unmatched_event_nocs<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    let pairs = events::Entity::find()
        .find_also_related(regions::Entity)
        .all(db)
        .await?;

    let mut codes: Vec<String> = pairs
        .into_iter()
        .filter(|(_, region)| region.is_none())
        .map(|(event, _)| event.noc)
        .collect();
    codes.sort();
    codes.dedup();
    Ok(codes)
}

fn open(path: &Path) -> SeedResult<File> {
    File::open(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<R: Read>(reader: R, source: &str, expected: usize) -> SeedResult<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| SeedError::Csv {
            file: source.to_string(),
            source: err,
        })?;
        if record.len() != expected {
            return Err(SeedError::MalformedRow {
                file: source.to_string(),
                line: line_of(&record),
                expected,
                found: record.len(),
            });
        }
        rows.push(record);
    }
    Ok(rows)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}

struct CsvRow<'a> {
    record: &'a StringRecord,
    source: &'a str,
}

impl CsvRow<'_> {
    fn text(&self, index: usize) -> String {
        self.record[index].to_string()
    }

    fn optional_text(&self, index: usize) -> Option<String> {
        let value = &self.record[index];
        (!value.is_empty()).then(|| value.to_string())
    }

    fn int(&self, index: usize, field: &'static str) -> SeedResult<i32> {
        let value = &self.record[index];
        value.trim().parse().map_err(|_| self.invalid(field, value))
    }

    fn optional_int(&self, index: usize, field: &'static str) -> SeedResult<Option<i32>> {
        let value = self.record[index].trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(|_| self.invalid(field, value))
    }

    fn invalid(&self, field: &'static str, value: &str) -> SeedError {
        SeedError::InvalidField {
            file: self.source.to_string(),
            line: line_of(self.record),
            field,
            value: value.to_string(),
        }
    }
}
