use crate::errors::DataError;
use chrono::NaiveDate;

pub const DATE_COL: &str = "date_report";
pub const PROVINCE_COL: &str = "province";
pub const REGION_COL: &str = "health_region";

/// The source download carries two junk lines before the real header row.
const SOURCE_PREAMBLE_LINES: usize = 2;
/// Report dates arrive day-month-year and are normalized to ISO.
const SOURCE_DATE_FORMAT: &str = "%d-%m-%Y";
const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d";

/// In-memory table of case records: the header row plus one row of string
/// cells per record. The date, province, and region columns are resolved up
/// front; every other column passes through untouched.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    date_idx: usize,
    province_idx: usize,
    region_idx: usize,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse a raw source download: skip the preamble, then parse CSV and
    /// rewrite each report date from `%d-%m-%Y` to ISO. Any missing required
    /// column or unparseable date rejects the whole dataset.
    pub fn from_source(bytes: &[u8]) -> Result<Self, DataError> {
        let body = skip_lines(bytes, SOURCE_PREAMBLE_LINES);
        let mut dataset = Self::parse(body)?;
        let date_idx = dataset.date_idx;
        for (idx, row) in dataset.rows.iter_mut().enumerate() {
            let cell = &mut row[date_idx];
            let parsed = NaiveDate::parse_from_str(cell.trim(), SOURCE_DATE_FORMAT).map_err(|_| {
                DataError::BadDate {
                    row: idx + 1,
                    value: cell.clone(),
                }
            })?;
            *cell = parsed.format(SNAPSHOT_DATE_FORMAT).to_string();
        }
        Ok(dataset)
    }

    /// Parse a stored snapshot; dates are already ISO.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, DataError> {
        Self::parse(bytes)
    }

    fn parse(bytes: &[u8]) -> Result<Self, DataError> {
        let mut reader = csv::Reader::from_reader(bytes);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let (date_idx, province_idx, region_idx) = (
            position(DATE_COL),
            position(PROVINCE_COL),
            position(REGION_COL),
        );
        let (Some(date_idx), Some(province_idx), Some(region_idx)) =
            (date_idx, province_idx, region_idx)
        else {
            let missing = [
                (DATE_COL, date_idx),
                (PROVINCE_COL, province_idx),
                (REGION_COL, region_idx),
            ]
            .into_iter()
            .filter_map(|(name, idx)| idx.is_none().then(|| name.to_string()))
            .collect();
            return Err(DataError::MissingColumns(missing));
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            headers,
            date_idx,
            province_idx,
            region_idx,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row[self.date_idx].as_str())
    }

    pub fn provinces(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row[self.province_idx].as_str())
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row[self.region_idx].as_str())
    }

    /// Rows matching the given province and region; either filter may be
    /// absent. A value present in neither column yields an empty dataset.
    pub fn restricted(&self, province: Option<&str>, region: Option<&str>) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                province.map_or(true, |p| row[self.province_idx] == p)
                    && region.map_or(true, |r| row[self.region_idx] == r)
            })
            .cloned()
            .collect();
        Self {
            headers: self.headers.clone(),
            date_idx: self.date_idx,
            province_idx: self.province_idx,
            region_idx: self.region_idx,
            rows,
        }
    }

    /// Serialize back to CSV, header first, for the snapshot store.
    pub fn to_csv(&self) -> Result<Vec<u8>, DataError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|err| DataError::Csv(err.into_error().into()))
    }
}

fn skip_lines(bytes: &[u8], count: usize) -> &[u8] {
    let mut rest = bytes;
    for _ in 0..count {
        match rest.iter().position(|&b| b == b'\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return &[],
        }
    }
    rest
}
