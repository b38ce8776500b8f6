// ============================================================
// CSV DECODER
// ============================================================
// Decode delimited-text files into rows with encoding and delimiter
// detection. One decode in flight at a time, bounded by a timeout.

use std::path::Path;
use std::time::Duration;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::csv::Row;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::Settings;

/// Outcome of decoding one file.
///
/// `columns` is the header row with whitespace-trimmed names. `rows`
/// excludes records that are empty across every field. `errors` carries
/// row-indexed parse warnings that did not abort the decode.
#[derive(Debug, Clone)]
pub struct DecodedCsv {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
    pub errors: Vec<String>,
}

/// Delimited-text decoder with file-acceptance gating.
pub struct CsvDecoder {
    settings: Settings,
    in_flight: Mutex<()>,
}

impl CsvDecoder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// File acceptance gate, checked before any bytes are decoded.
    pub fn validate_file(&self, path: &Path, file_size: u64) -> Result<()> {
        if file_size > self.settings.max_file_size_bytes {
            let max_mb = self.settings.max_file_size_bytes as f64 / 1024.0 / 1024.0;
            let size_mb = file_size as f64 / 1024.0 / 1024.0;
            return Err(AppError::ValidationError(format!(
                "File too large. Maximum size is {:.0}MB, your file is {:.1}MB.",
                max_mb, size_mb
            )));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        if !self.settings.accepted_extensions.contains(&extension) {
            return Err(AppError::ValidationError(format!(
                "Invalid file type. Please upload a CSV file ({}).",
                self.settings.accepted_extensions.join(" or ")
            )));
        }

        Ok(())
    }

    /// Decode a file asynchronously.
    ///
    /// At most one decode runs at a time; a request arriving while another
    /// is pending is dropped with an error rather than queued. The whole
    /// decode is bounded by the configured timeout, and nothing partial
    /// escapes on failure.
    pub async fn decode_file(&self, path: &Path) -> Result<DecodedCsv> {
        let metadata = tokio::fs::metadata(path).await?;
        self.validate_file(path, metadata.len())?;

        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!(path = %path.display(), "decode already in flight, dropping request");
            return Err(AppError::ValidationError(
                "A file is already being processed".to_string(),
            ));
        };

        let path_buf = path.to_path_buf();
        let parse = tokio::task::spawn_blocking(move || {
            let bytes = std::fs::read(&path_buf)?;
            let content = decode_bytes(&bytes);
            let delimiter = detect_delimiter(&content);
            decode_content_with_delimiter(&content, delimiter)
        });

        let timeout = Duration::from_secs(self.settings.decode_timeout_secs);
        match tokio::time::timeout(timeout, parse).await {
            Ok(Ok(result)) => {
                if let Ok(decoded) = &result {
                    debug!(
                        rows = decoded.rows.len(),
                        columns = decoded.columns.len(),
                        warnings = decoded.errors.len(),
                        "decoded file"
                    );
                }
                result
            }
            Ok(Err(join_err)) => Err(AppError::Internal(format!(
                "Decode task failed: {}",
                join_err
            ))),
            Err(_) => {
                warn!(
                    path = %path.display(),
                    timeout_secs = self.settings.decode_timeout_secs,
                    "decode timed out"
                );
                Err(AppError::Timeout(format!(
                    "Decoding took longer than {} seconds",
                    self.settings.decode_timeout_secs
                )))
            }
        }
    }
}

/// Decode in-memory content with automatic delimiter detection.
pub fn decode_content(content: &str) -> Result<DecodedCsv> {
    decode_content_with_delimiter(content, detect_delimiter(content))
}

fn decode_content_with_delimiter(content: &str, delimiter: u8) -> Result<DecodedCsv> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::Headers)
        .flexible(true) // Allow rows with different lengths
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();
    let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Row = columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| (col.clone(), record.get(i).unwrap_or("").to_string()))
                    .collect();

                // Drop records that are empty across every field
                if row.values().any(|v| !v.is_empty()) {
                    rows.push(row);
                }
            }
            Err(e) => errors.push(format!("Row {}: {}", index, e)),
        }
    }

    Ok(DecodedCsv {
        rows,
        columns,
        errors,
    })
}

/// Decode raw bytes as UTF-8 (BOM-aware), falling back to Windows-1252.
fn decode_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Detect the delimiter from a content sample (comma, semicolon, tab, pipe).
///
/// Scores each candidate by per-line frequency and consistency over the
/// first ten lines.
pub fn detect_delimiter(content: &str) -> u8 {
    let candidates = [b',', b';', b'\t', b'|'];

    let mut best_delimiter = b',';
    let mut best_score = 0.0f32;

    let sample_lines: Vec<_> = content.lines().take(10).collect();
    if sample_lines.is_empty() {
        return best_delimiter;
    }

    for &delimiter in &candidates {
        let field_counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delimiter).count())
            .collect();

        let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
        let variance = field_counts
            .iter()
            .map(|&x| (x as f32 - avg).powi(2))
            .sum::<f32>()
            / field_counts.len() as f32;

        // Consistent high counts win
        let score = avg / (1.0 + variance.sqrt());

        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_simple_csv() {
        let decoded = decode_content("name,age\nAlice,30\nBob,25").unwrap();

        assert_eq!(decoded.columns, vec!["name", "age"]);
        assert_eq!(decoded.rows.len(), 2);
        assert_eq!(decoded.rows[0]["name"], "Alice");
        assert_eq!(decoded.rows[1]["age"], "25");
        assert!(decoded.errors.is_empty());
    }

    #[test]
    fn test_headers_are_trimmed() {
        let decoded = decode_content(" name , age \nAlice,30").unwrap();
        assert_eq!(decoded.columns, vec!["name", "age"]);
    }

    #[test]
    fn test_empty_rows_dropped() {
        let decoded = decode_content("a,b\n1,2\n,\n3,4").unwrap();
        assert_eq!(decoded.rows.len(), 2);
        assert_eq!(decoded.rows[1]["a"], "3");
    }

    #[test]
    fn test_short_record_fills_missing_fields() {
        let decoded = decode_content("a,b,c\n1,2").unwrap();
        assert_eq!(decoded.rows[0]["c"], "");
    }

    #[test]
    fn test_quoted_fields() {
        let decoded = decode_content("a,b\n\"x, y\",\"say \"\"hi\"\"\"").unwrap();
        assert_eq!(decoded.rows[0]["a"], "x, y");
        assert_eq!(decoded.rows[0]["b"], "say \"hi\"");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(detect_delimiter("a\tb\tc\nd\te\tf"), b'\t');
    }

    #[test]
    fn test_decode_bytes_latin1_fallback() {
        // 0xE9 is é in Windows-1252 but invalid UTF-8
        let bytes = b"caf\xe9";
        assert_eq!(decode_bytes(bytes), "café");
    }

    #[test]
    fn test_decode_bytes_strips_utf8_bom() {
        let bytes = b"\xef\xbb\xbfname";
        assert_eq!(decode_bytes(bytes), "name");
    }

    #[test]
    fn test_validate_file_gate() {
        let decoder = CsvDecoder::new(Settings::default());

        assert!(decoder.validate_file(Path::new("data.csv"), 1024).is_ok());
        assert!(decoder.validate_file(Path::new("data.txt"), 1024).is_ok());
        assert!(decoder.validate_file(Path::new("DATA.CSV"), 1024).is_ok());

        let too_big = 11 * 1024 * 1024;
        assert!(decoder
            .validate_file(Path::new("data.csv"), too_big)
            .is_err());
        assert!(decoder.validate_file(Path::new("data.xlsx"), 1024).is_err());
        assert!(decoder
            .validate_file(Path::new("noextension"), 1024)
            .is_err());
    }

    #[tokio::test]
    async fn test_decode_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "name,email\nAlice,a@b.com\n").unwrap();

        let decoder = CsvDecoder::new(Settings::default());
        let decoded = decoder.decode_file(&path).await.unwrap();

        assert_eq!(decoded.columns, vec!["name", "email"]);
        assert_eq!(decoded.rows[0]["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_decode_file_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(&path, "{}").unwrap();

        let decoder = CsvDecoder::new(Settings::default());
        let err = decoder.decode_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_decode_file_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.csv");
        let mut content = String::from("id,name\n");
        for i in 0..10_000 {
            content.push_str(&format!("{},row {}\n", i, i));
        }
        std::fs::write(&path, content).unwrap();

        let decoder = CsvDecoder::new(Settings {
            decode_timeout_secs: 0,
            ..Settings::default()
        });
        let err = decoder.decode_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_concurrent_decode_is_dropped_not_queued() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name\nAlice\n").unwrap();

        let decoder = CsvDecoder::new(Settings::default());

        // Occupy the in-flight slot as a pending decode would
        let guard = decoder.in_flight.try_lock().unwrap();

        let err = decoder.decode_file(&path).await.unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "A file is already being processed")
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }

        // Once the first decode finishes, the next request goes through
        drop(guard);
        let decoded = decoder.decode_file(&path).await.unwrap();
        assert_eq!(decoded.rows.len(), 1);
    }
}
