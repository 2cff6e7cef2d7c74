use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Column names shared by every supported format.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version";
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four launch columns are found by name,
///   any other column is ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let file = std::fs::File::open(path).context("opening JSON file")?;
            read_json(file)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {} (sites: {:?})",
        dataset.len(),
        path.display(),
        dataset.sites()
    );
    Ok(dataset)
}

fn make_record(site: &str, payload: f64, booster: &str, class: i64) -> Result<LaunchRecord> {
    let outcome = Outcome::try_from(class)?;
    Ok(LaunchRecord::new(site, payload, booster, outcome)?)
}

/// Accept `1`, `0`, and the float spellings `1.0` / `0.0`.
fn parse_class(s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    let f: f64 = s
        .parse()
        .with_context(|| format!("'{s}' is not a class value"))?;
    if f.fract() != 0.0 {
        bail!("'{s}' is not an integer class value");
    }
    Ok(f as i64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read launch records from CSV with a header row.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let payload_raw = field(payload_idx);
        let payload: f64 = payload_raw.parse().with_context(|| {
            format!("CSV row {row_no}: '{payload_raw}' is not a payload mass")
        })?;
        let class = parse_class(field(class_idx)).with_context(|| format!("CSV row {row_no}"))?;

        let record = make_record(field(site_idx), payload, field(booster_idx), class)
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version": "F9 v1.0  B0004",
///     "class": 0
///   },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(input: R) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_reader(input).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let text = |key: &str| {
            obj.get(key)
                .and_then(JsonValue::as_str)
                .with_context(|| format!("Row {i}: missing or non-string '{key}'"))
        };
        let number = |key: &str| {
            obj.get(key)
                .and_then(JsonValue::as_f64)
                .with_context(|| format!("Row {i}: missing or non-numeric '{key}'"))
        };

        let class = match obj.get(CLASS_COLUMN).and_then(JsonValue::as_i64) {
            Some(c) => c,
            None => parse_class(&number(CLASS_COLUMN)?.to_string())
                .with_context(|| format!("Row {i}"))?,
        };

        let record = make_record(
            text(SITE_COLUMN)?,
            number(PAYLOAD_COLUMN)?,
            text(BOOSTER_COLUMN)?,
            class,
        )
        .with_context(|| format!("Row {i}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32 or an integral Float64
///
/// Other columns are ignored. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    read_parquet(file)
}

/// Read launch records from any Parquet source (a `File`, an in-memory
/// `Bytes` buffer, ...).
pub fn read_parquet<R: ChunkReader + 'static>(input: R) -> Result<LaunchDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i))
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let site_col = column(SITE_COLUMN)?;
        let payload_col = column(PAYLOAD_COLUMN)?;
        let booster_col = column(BOOSTER_COLUMN)?;
        let class_col = column(CLASS_COLUMN)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let site = string_at(site_col, row)
                .with_context(|| format!("Row {row_no}: '{SITE_COLUMN}'"))?;
            let payload = number_at(payload_col, row)
                .with_context(|| format!("Row {row_no}: '{PAYLOAD_COLUMN}'"))?;
            let booster = string_at(booster_col, row)
                .with_context(|| format!("Row {row_no}: '{BOOSTER_COLUMN}'"))?;
            let class = number_at(class_col, row)
                .and_then(|c| parse_class(&c.to_string()))
                .with_context(|| format!("Row {row_no}: '{CLASS_COLUMN}'"))?;

            let record = make_record(&site, payload, &booster, class)
                .with_context(|| format!("Row {row_no}"))?;
            records.push(record);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn number_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => f64::from(
            col.as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?
                .value(row),
        ),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => f64::from(
            col.as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?
                .value(row),
        ),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, LargeStringArray, StringArray};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
3,VAFB SLC-4E,1,9600,F9 FT B1029.1,FT
";

    #[test]
    fn csv_columns_found_by_name() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        let last = &ds.records()[2];
        assert_eq!(last.site, "VAFB SLC-4E");
        assert_eq!(last.payload_mass_kg, 9600.0);
        assert_eq!(last.booster_version, "F9 FT B1029.1");
        assert_eq!(last.outcome, Outcome::Success);
        assert_eq!(ds.sites(), ["CCAFS LC-40".to_string(), "VAFB SLC-4E".to_string()]);
        assert_eq!((ds.payload_min(), ds.payload_max()), (0.0, 9600.0));
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let err = read_csv("Launch Site,class\nA,1\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_rejects_bad_class_and_negative_payload() {
        let bad_class = "Launch Site,Payload Mass (kg),Booster Version,class\nA,10,B,2\n";
        let err = read_csv(bad_class.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 0"));

        let negative = "Launch Site,Payload Mass (kg),Booster Version,class\nA,-5,B,1\n";
        assert!(read_csv(negative.as_bytes()).is_err());

        let not_a_number = "Launch Site,Payload Mass (kg),Booster Version,class\nA,heavy,B,1\n";
        assert!(read_csv(not_a_number.as_bytes()).is_err());
    }

    #[test]
    fn csv_accepts_float_class() {
        let text = "Launch Site,Payload Mass (kg),Booster Version,class\nA,10,B,1.0\nA,20,B,0.0\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_records() {
        let text = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "Booster Version": "F9 FT B1031.1", "class": 1},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 3600.5, "Booster Version": "F9 B4 B1041.1", "class": 0.0}
        ]"#;
        let ds = read_json(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_mass_kg, 2490.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_rejects_missing_fields_and_non_arrays() {
        assert!(read_json(r#"{"Launch Site": "A"}"#.as_bytes()).is_err());
        let err = read_json(r#"[{"Launch Site": "A", "class": 1}]"#.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    fn parquet_bytes(columns: Vec<(&str, ArrayRef)>) -> bytes::Bytes {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        bytes::Bytes::from(writer.into_inner().unwrap())
    }

    fn strings(values: &[&str]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    #[test]
    fn parquet_accepts_large_strings_and_int_payloads() {
        let data = parquet_bytes(vec![
            (
                SITE_COLUMN,
                Arc::new(LargeStringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])) as ArrayRef,
            ),
            (PAYLOAD_COLUMN, Arc::new(Int32Array::from(vec![2490, 9600])) as ArrayRef),
            (BOOSTER_COLUMN, strings(&["F9 FT B1031.1", "F9 FT B1029.1"])),
            (CLASS_COLUMN, Arc::new(Int64Array::from(vec![1, 0])) as ArrayRef),
            ("Flight Number", Arc::new(Int64Array::from(vec![30, 31])) as ArrayRef),
        ]);

        let ds = read_parquet(data).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].site, "KSC LC-39A");
        assert_eq!(ds.records()[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn parquet_accepts_float32_payload_and_float_class() {
        let data = parquet_bytes(vec![
            (SITE_COLUMN, strings(&["CCAFS LC-40"])),
            (PAYLOAD_COLUMN, Arc::new(Float32Array::from(vec![525.5_f32])) as ArrayRef),
            (BOOSTER_COLUMN, strings(&["F9 v1.0  B0004"])),
            (CLASS_COLUMN, Arc::new(Float64Array::from(vec![1.0])) as ArrayRef),
        ]);

        let ds = read_parquet(data).unwrap();
        assert_eq!(ds.records()[0].payload_mass_kg, 525.5);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
    }

    #[test]
    fn parquet_rejects_invalid_class_with_row_context() {
        let data = parquet_bytes(vec![
            (SITE_COLUMN, strings(&["A", "A"])),
            (PAYLOAD_COLUMN, Arc::new(Float64Array::from(vec![100.0, 200.0])) as ArrayRef),
            (BOOSTER_COLUMN, strings(&["B1", "B2"])),
            (CLASS_COLUMN, Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
        ]);

        let err = format!("{:#}", read_parquet(data).unwrap_err());
        assert!(err.contains("Row 1"), "{err}");
        assert!(err.contains("got 2"), "{err}");
    }

    #[test]
    fn parquet_rejects_null_payload() {
        let data = parquet_bytes(vec![
            (SITE_COLUMN, strings(&["A"])),
            (PAYLOAD_COLUMN, Arc::new(Float64Array::from(vec![None])) as ArrayRef),
            (BOOSTER_COLUMN, strings(&["B1"])),
            (CLASS_COLUMN, Arc::new(Int64Array::from(vec![1])) as ArrayRef),
        ]);

        let err = format!("{:#}", read_parquet(data).unwrap_err());
        assert!(err.contains("null value"), "{err}");
    }

    #[test]
    fn parquet_missing_column_is_an_error() {
        let data = parquet_bytes(vec![
            (SITE_COLUMN, strings(&["A"])),
            (BOOSTER_COLUMN, strings(&["B1"])),
            (CLASS_COLUMN, Arc::new(Int64Array::from(vec![1])) as ArrayRef),
        ]);

        let err = read_parquet(data).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'Payload Mass (kg)' column"));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
