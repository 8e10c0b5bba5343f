//! Trade import
//!
//! Turns journal exports into validated [`TradeRecord`]s:
//! - CSV files with arbitrary header spellings ([`import_csv`])
//! - JSON arrays in the journal document shape ([`load_json`])
//!
//! A bad CSV row is skipped and reported; it never aborts the import.

pub mod columns;
pub mod error;
pub mod values;

pub use columns::{ColumnMapping, Field};
pub use error::ImportError;

use common::{TradeDocument, TradeId, TradeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Import configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// CSV field delimiter, a single ASCII character
    pub delimiter: String,
    /// chrono date formats tried in order
    pub date_formats: Vec<String>,
    /// Extra header aliases per field name, checked before the built-in ones
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Strip whitespace around headers and cells. When off, text cells such as
    /// ids and strategy names are kept verbatim; numbers, dates and enum cells
    /// are parsed leniently either way.
    pub trim: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y/%m/%d".to_string(),
                "%Y.%m.%d".to_string(),
                "%d.%m.%Y".to_string(),
                "%m/%d/%Y".to_string(),
            ],
            aliases: BTreeMap::new(),
            trim: true,
        }
    }
}

impl ImportConfig {
    fn delimiter_byte(&self) -> Result<u8, ImportError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ if self.delimiter == "\\t" => Ok(b'\t'),
            _ => Err(ImportError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}

/// A CSV row that could not become a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based line number in the source
    pub line: u64,
    /// Why the row was skipped
    pub reason: String,
}

/// Outcome of an import
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Records that passed validation, in source order
    pub records: Vec<TradeRecord>,
    /// Rows that were skipped
    pub skipped: Vec<RowError>,
    /// Column mapping used, for CSV sources
    pub mapping: Option<ColumnMapping>,
}

/// Read only the header row and guess the column mapping
pub fn detect_columns<R: Read>(
    reader: R,
    config: &ImportConfig,
) -> Result<ColumnMapping, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::NoHeader);
    }
    let header_list: Vec<&str> = headers.iter().collect();
    ColumnMapping::detect(&header_list, config)
}

/// Import a CSV journal export
pub fn import_csv<R: Read>(reader: R, config: &ImportConfig) -> Result<ImportReport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .trim(if config.trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::NoHeader);
    }
    let header_list: Vec<&str> = headers.iter().collect();
    let mapping = ColumnMapping::detect(&header_list, config)?;
    info!(columns = ?mapping.pairs(), "Detected column mapping");

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for row in csv_reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map_or(0, csv::Position::line);
                skipped.push(RowError {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = row.position().map_or(0, csv::Position::line);
        if row.iter().all(|cell| cell.trim().is_empty()) {
            debug!(line, "Skipping blank row");
            continue;
        }

        match row_to_record(&row, &mapping, config) {
            Ok(record) => records.push(record),
            Err(reason) => {
                if skipped.len() < 5 {
                    warn!(line, %reason, "Skipping row");
                }
                skipped.push(RowError { line, reason });
            }
        }
    }

    if !skipped.is_empty() {
        warn!(skipped = skipped.len(), "Rows skipped during import");
    }
    info!(imported = records.len(), "CSV import finished");

    Ok(ImportReport {
        records,
        skipped,
        mapping: Some(mapping),
    })
}

/// Load a JSON array of journal documents; the first invalid one fails the load
pub fn load_json<R: Read>(reader: R) -> Result<Vec<TradeRecord>, ImportError> {
    let documents: Vec<TradeDocument> = serde_json::from_reader(reader)?;
    let records = documents
        .into_iter()
        .enumerate()
        .map(|(index, doc)| {
            TradeRecord::try_from(doc)
                .map_err(|source| ImportError::InvalidDocument { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(loaded = records.len(), "Loaded JSON journal");
    Ok(records)
}

/// Load a journal file, choosing JSON or CSV by extension
pub fn load_file(path: &Path, config: &ImportConfig) -> Result<ImportReport, ImportError> {
    let file = std::fs::File::open(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(ImportReport {
            records: load_json(std::io::BufReader::new(file))?,
            skipped: Vec::new(),
            mapping: None,
        })
    } else {
        import_csv(file, config)
    }
}

fn row_to_record(
    row: &csv::StringRecord,
    mapping: &ColumnMapping,
    config: &ImportConfig,
) -> Result<TradeRecord, String> {
    let cell = |field: Field| mapping.cell(row, field);
    let number = |field: Field| -> Result<Option<f64>, String> {
        cell(field)
            .map_or(Ok(None), values::parse_number)
            .map_err(|raw| format!("invalid {}: {raw:?}", field.name()))
    };

    let raw_date = cell(Field::Date).ok_or("missing date")?;
    let (date, stamped_time) = values::parse_date(raw_date, &config.date_formats)
        .ok_or_else(|| format!("invalid date: {raw_date:?}"))?;

    let time = |field: Field| -> Result<Option<chrono::NaiveTime>, String> {
        cell(field).map_or(Ok(None), |raw| {
            values::parse_time(raw, &config.date_formats)
                .map(Some)
                .ok_or_else(|| format!("invalid {}: {raw:?}", field.name()))
        })
    };

    let direction = match cell(Field::Direction) {
        Some(raw) => Some(
            values::parse_direction(raw).ok_or_else(|| format!("invalid direction: {raw:?}"))?,
        ),
        None => None,
    };
    let result = match cell(Field::Result) {
        Some(raw) => {
            Some(values::parse_result(raw).ok_or_else(|| format!("invalid result: {raw:?}"))?)
        }
        None => None,
    };

    // informational fields: unknown spellings are dropped rather than failing the row
    let session = cell(Field::Session).and_then(|raw| {
        let session = values::parse_session(raw);
        if session.is_none() {
            debug!(value = raw, "Unrecognised session");
        }
        session
    });
    let adherence = cell(Field::AdherenceToPlan).and_then(values::parse_adherence);

    let id = cell(Field::Id).map_or_else(|| TradeId::new(Uuid::new_v4().to_string()), TradeId::new);

    let document = TradeDocument {
        id: Some(id),
        date: Some(date.format("%Y-%m-%d").to_string()),
        entry_time: time(Field::EntryTime)?
            .or(stamped_time)
            .map(|t| t.format("%H:%M:%S").to_string()),
        exit_time: time(Field::ExitTime)?.map(|t| t.format("%H:%M:%S").to_string()),
        session,
        direction,
        entry_price: number(Field::EntryPrice)?,
        stop_loss: number(Field::StopLoss)?,
        take_profit: number(Field::TakeProfit)?,
        position_size: number(Field::PositionSize)?,
        pnl: number(Field::Pnl)?,
        result,
        strategy_id: cell(Field::StrategyId).map(common::StrategyId::new),
        adherence_to_plan: adherence,
    };

    TradeRecord::try_from(document).map_err(|e| e.to_string())
}
