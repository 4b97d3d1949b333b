//! CSV source for the job-postings dataset

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use jv_core::record::{normalize, RawRow, Record};

use crate::DataError;

/// Required dataset columns, located by header name.
const COLUMNS: [&str; 7] = [
    "job_title",
    "company_location",
    "posting_date",
    "salary_usd",
    "years_experience",
    "remote_ratio",
    "required_skills",
];

/// Loader for the job-postings CSV file.
///
/// Reads headers, locates the required columns by name, and parses each row
/// into a [`RawRow`]. Numeric fields parse leniently: an empty or
/// unparseable value becomes `None` and the normalizer decides what that
/// means. Structural problems (missing file, missing column, broken row)
/// are fatal and surface as [`DataError`].
pub struct CsvSource;

/// Column indices resolved from the header row.
struct ColumnIndex {
    job_title: usize,
    company_location: usize,
    posting_date: usize,
    salary_usd: usize,
    years_experience: usize,
    remote_ratio: usize,
    required_skills: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| -> Result<usize, DataError> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            job_title: find(COLUMNS[0])?,
            company_location: find(COLUMNS[1])?,
            posting_date: find(COLUMNS[2])?,
            salary_usd: find(COLUMNS[3])?,
            years_experience: find(COLUMNS[4])?,
            remote_ratio: find(COLUMNS[5])?,
            required_skills: find(COLUMNS[6])?,
        })
    }
}

impl CsvSource {
    /// Read the file into raw rows, in file order.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<RawRow>, DataError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let columns = ColumnIndex::resolve(reader.headers()?)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(RawRow {
                job_title: field(&record, columns.job_title),
                company_location: field(&record, columns.company_location),
                posting_date: field(&record, columns.posting_date),
                salary_usd: parse_f64(record.get(columns.salary_usd)),
                years_experience: parse_f64(record.get(columns.years_experience)),
                remote_ratio: parse_i64(record.get(columns.remote_ratio)),
                required_skills: field(&record, columns.required_skills),
            });
        }

        info!(rows = rows.len(), path = %path.display(), "loaded job postings");
        Ok(rows)
    }

    /// Load and normalize in one step.
    pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, DataError> {
        Ok(normalize(Self::load(path)?))
    }
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().trim().to_string()
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_i64(value: Option<&str>) -> Option<i64> {
    let value = value.map(str::trim)?;
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    // Some exports write integer columns as floats ("50.0")
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "jv_data_test_{}_{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "job_title,company_location,posting_date,salary_usd,years_experience,remote_ratio,required_skills\n";

    #[test]
    fn loads_rows_with_lenient_numeric_parsing() {
        let path = write_temp_csv(&format!(
            "{HEADER}ML Engineer,Germany,2024-03-15,100000,4,50,\"Python, SQL\"\n\
             Data Scientist,France,bad-date,,not-a-number,75,Python\n"
        ));

        let rows = CsvSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].salary_usd, Some(100_000.0));
        assert_eq!(rows[0].remote_ratio, Some(50));
        assert_eq!(rows[1].salary_usd, None);
        assert_eq!(rows[1].years_experience, None);
        assert_eq!(rows[1].remote_ratio, Some(75));
    }

    #[test]
    fn load_records_normalizes() {
        let path = write_temp_csv(&format!(
            "{HEADER}ML Engineer,Germany,2024-03-15,100000,4,0,\"Python, SQL\"\n"
        ));

        let records = CsvSource::load_records(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records[0].month.as_deref(), Some("2024-03"));
        assert_eq!(records[0].location_key, "germany");
        assert_eq!(records[0].required_skills.len(), 2);
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = write_temp_csv("job_title,company_location\nML Engineer,Germany\n");

        let err = CsvSource::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, DataError::MissingColumn(_)));
    }

    #[test]
    fn float_formatted_ratio_parses() {
        assert_eq!(parse_i64(Some("50.0")), Some(50));
        assert_eq!(parse_i64(Some("50.5")), None);
        assert_eq!(parse_i64(Some("")), None);
        assert_eq!(parse_i64(Some("100")), Some(100));
    }
}
