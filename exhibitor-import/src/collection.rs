//! Identifier-keyed store of exhibition records.
//!
//! A [`Collection`] keeps records in insertion order, which is the order
//! every later pass (slugs, summaries) walks them in. Rows must therefore be
//! inserted in source order for reproducible merge and slug-suffix results.

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use exhibitor_catalog::{Crosswalk, Field, Record, adapt_row};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::ExhibitError;
use crate::merge::{DEFAULT_DELIMITER, merge_records};

// ── Format ──────────────────────────────────────────────────────────────────

/// Serialization formats a collection can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited rows with a header line (load only)
    Csv,
    /// Identifier-keyed object of field mappings
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ExhibitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ExhibitError::UnsupportedFormat {
                format: s.to_string(),
                operation: "load or dump",
                supported: "csv, json",
            }),
        }
    }
}

// ── Insertion ───────────────────────────────────────────────────────────────

/// Something that can be inserted: a raw row or an already-built record.
#[derive(Debug, Clone)]
pub enum Incoming {
    Row(Value),
    Record(Record),
}

impl From<Value> for Incoming {
    fn from(row: Value) -> Self {
        Self::Row(row)
    }
}

impl From<Record> for Incoming {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// What [`Collection::insert`] did with the incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored under a new identifier
    Inserted(String),
    /// Merged into the record already stored under this identifier
    Merged(String),
}

impl InsertOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Inserted(id) | Self::Merged(id) => id,
        }
    }
}

// ── Collection ──────────────────────────────────────────────────────────────

/// An identifier -> [`Record`] mapping with a lazily built title index and
/// the slug-collision counter.
///
/// The slug counter persists across [`make_slugs`](crate::make_slugs) calls:
/// running slug generation twice on one collection suffixes every slug the
/// second time. Build a fresh collection, or call
/// [`reset_slug_counts`](Self::reset_slug_counts), before an independent run.
#[derive(Debug)]
pub struct Collection {
    records: IndexMap<String, Record>,
    crosswalk: Crosswalk,
    delimiter: String,
    title_index: OnceCell<HashMap<String, Vec<String>>>,
    slug_counts: HashMap<String, usize>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(Crosswalk::Identity)
    }
}

impl Collection {
    /// Create an empty collection whose raw rows are read through `crosswalk`.
    pub fn new(crosswalk: Crosswalk) -> Self {
        Self {
            records: IndexMap::new(),
            crosswalk,
            delimiter: DEFAULT_DELIMITER.to_string(),
            title_index: OnceCell::new(),
            slug_counts: HashMap::new(),
        }
    }

    /// Use `delimiter` between divergent values when merging.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn crosswalk(&self) -> &Crosswalk {
        &self.crosswalk
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Mutable access to one record. Invalidates the title index.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.title_index.take();
        self.records.get_mut(id)
    }

    /// Mutable access to every record in insertion order. Invalidates the
    /// title index.
    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.title_index.take();
        self.records.values_mut()
    }

    pub(crate) fn slug_counts_mut(&mut self) -> &mut HashMap<String, usize> {
        &mut self.slug_counts
    }

    /// Forget every slug claimed so far.
    pub fn reset_slug_counts(&mut self) {
        self.slug_counts.clear();
    }

    /// Insert a raw row or a record.
    ///
    /// A raw row is adapted through the collection's crosswalk, with `id` as
    /// the explicit identifier. A record is stored as is, or as a copy
    /// carrying `id` when one is given.
    ///
    /// On an identifier collision the call fails with
    /// [`ExhibitError::Collision`] unless `merge` is set, in which case the
    /// stored record is replaced by the merge of (stored, incoming) under
    /// the same identifier.
    pub fn insert(
        &mut self,
        incoming: impl Into<Incoming>,
        id: Option<&str>,
        merge: bool,
    ) -> Result<InsertOutcome, ExhibitError> {
        let record = match incoming.into() {
            Incoming::Row(row) => adapt_row(&row, id, &self.crosswalk)?,
            Incoming::Record(record) => match id {
                Some(id) if id != record.id() => record.with_id(id),
                _ => record,
            },
        };

        let id = record.id().to_string();
        let outcome = match self.records.get_mut(&id) {
            None => {
                self.records.insert(id.clone(), record);
                InsertOutcome::Inserted(id)
            }
            Some(existing) if merge => {
                log::warn!("Merging records with id={id}. You may want to check the title.");
                *existing = merge_records(existing, &record, &self.delimiter);
                InsertOutcome::Merged(id)
            }
            Some(_) => return Err(ExhibitError::Collision { id }),
        };
        self.title_index.take();
        Ok(outcome)
    }

    /// Identifiers of every record whose title is exactly `title`, in
    /// insertion order. Unknown titles yield an empty slice.
    pub fn lookup_by_title(&self, title: &str) -> &[String] {
        let index = self.title_index.get_or_init(|| {
            let mut index: HashMap<String, Vec<String>> = HashMap::new();
            for (id, record) in &self.records {
                if let Some(t) = record.get(Field::Title) {
                    index.entry(t.to_string()).or_default().push(id.clone());
                }
            }
            index
        });
        index.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Identifiers of records still missing a required field.
    pub fn incomplete(&self) -> Vec<(&str, Vec<Field>)> {
        self.records
            .iter()
            .filter_map(|(id, record)| {
                let missing = record.missing_required();
                (!missing.is_empty()).then_some((id.as_str(), missing))
            })
            .collect()
    }

    // ── Load ────────────────────────────────────────────────────────────────

    /// Read rows from a file and insert each one in encounter order.
    ///
    /// Returns the number of rows read.
    pub fn load(&mut self, path: &Path, format: Format, merge: bool) -> Result<usize, ExhibitError> {
        let file = std::fs::File::open(path).map_err(|e| ExhibitError::io(path.display().to_string(), e))?;
        log::debug!("Loading {} rows from {}", format, path.display());
        self.load_reader(file, format, merge)
    }

    /// Read rows from any reader and insert each one in encounter order.
    pub fn load_reader<R: Read>(&mut self, mut reader: R, format: Format, merge: bool) -> Result<usize, ExhibitError> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| ExhibitError::io("<input>", e))?;
        match format {
            Format::Csv => {
                let rows = parse_csv_rows(&contents)?;
                let count = rows.len();
                for row in rows {
                    self.insert(row, None, merge)?;
                }
                Ok(count)
            }
            Format::Json => {
                let document: IndexMap<String, Value> = serde_json::from_str(&contents)?;
                let count = document.len();
                for (id, datum) in document {
                    self.insert(datum, Some(&id), merge)?;
                }
                Ok(count)
            }
        }
    }

    // ── Dump ────────────────────────────────────────────────────────────────

    /// Identifier -> record, sorted by identifier.
    pub fn to_document(&self) -> BTreeMap<&str, &Record> {
        self.records.iter().map(|(id, r)| (id.as_str(), r)).collect()
    }

    /// Serialize the collection. Only [`Format::Json`] can be written.
    pub fn dump<W: Write>(&self, writer: W, format: Format) -> Result<(), ExhibitError> {
        ensure_dumpable(format)?;
        write_json(writer, &self.to_document())
    }

    /// Serialize the collection to a file.
    ///
    /// The format is checked before the file is created.
    pub fn dump_to_path(&self, path: &Path, format: Format) -> Result<(), ExhibitError> {
        ensure_dumpable(format)?;
        let file = std::fs::File::create(path).map_err(|e| ExhibitError::io(path.display().to_string(), e))?;
        let mut writer = std::io::BufWriter::new(file);
        self.dump(&mut writer, format)?;
        writer
            .flush()
            .map_err(|e| ExhibitError::io(path.display().to_string(), e))
    }
}

fn ensure_dumpable(format: Format) -> Result<(), ExhibitError> {
    match format {
        Format::Json => Ok(()),
        other => Err(ExhibitError::UnsupportedFormat {
            format: other.to_string(),
            operation: "dump",
            supported: "json",
        }),
    }
}

/// Write `value` as pretty JSON: four-space indent, non-ASCII unescaped,
/// trailing newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), ExhibitError> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer
        .write_all(b"\n")
        .map_err(|e| ExhibitError::io("<output>", e))
}

/// Parse delimited text into raw rows keyed by header name.
///
/// The delimiter is sniffed from the header line (tab, semicolon, or comma).
/// Columns with a blank header and rows whose cells are all blank are
/// skipped.
fn parse_csv_rows(contents: &str) -> Result<Vec<Value>, ExhibitError> {
    let contents = contents.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(sniff_delimiter(contents))
        .from_reader(contents.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.trim().is_empty() {
                if !cell.trim().is_empty() {
                    log::warn!("Ignoring value under blank header in row {}: {cell:?}", line + 1);
                }
                continue;
            }
            row.insert(header.to_string(), Value::String(cell.to_string()));
        }
        if row.values().all(|v| v.as_str().is_some_and(|s| s.trim().is_empty())) {
            log::debug!("Skipping blank row {}", line + 1);
            continue;
        }
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

fn sniff_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or("");
    [b'\t', b';', b',']
        .into_iter()
        .max_by_key(|d| header.bytes().filter(|b| b == d).count())
        .filter(|d| header.as_bytes().contains(d))
        .unwrap_or(b',')
}
