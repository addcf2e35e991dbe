//! CSV to [`SpeechRecord`] parser with encoding auto-detection.
//!
//! Expected columns, no header required:
//!
//! ```text
//! speaker, topic, date (YYYY-MM-DD), words
//! ```
//!
//! Rows that cannot be turned into a record are reported as [`SkippedRow`]s
//! and parsing carries on. A header line ends up there too, since its date
//! column does not parse.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{RowError, RowResult};
use crate::models::SpeechRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row that did not make it into the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source.
    pub line: u64,
    /// Raw fields joined with commas.
    pub content: String,
    pub reason: RowError,
}

/// Records parsed from one source, in file order.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub records: Vec<SpeechRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Detected encoding of the raw bytes
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding label.
///
/// Labels are resolved the WHATWG way, so the latin1 family maps to
/// windows-1252. Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding_rs::Encoding::for_label(encoding.trim().as_bytes()) {
        Some(enc) => enc.decode(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Turn one CSV row into a record.
pub fn parse_row(row: &StringRecord) -> RowResult<SpeechRecord> {
    if row.len() < 4 {
        return Err(RowError::MissingColumns { found: row.len() });
    }

    let date = NaiveDate::parse_from_str(&row[2], DATE_FORMAT)
        .map_err(|_| RowError::InvalidDate(row[2].to_string()))?;
    let words = row[3]
        .parse::<i32>()
        .map_err(|_| RowError::InvalidWords(row[3].to_string()))?;

    Ok(SpeechRecord::new(&row[0], &row[1], date, words))
}

/// Parse decoded CSV text.
pub fn parse_str(content: &str) -> ParseResult {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut result = ParseResult {
        encoding: "utf-8".to_string(),
        ..Default::default()
    };

    for (idx, row) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                result.skipped.push(SkippedRow {
                    line,
                    content: String::new(),
                    reason: RowError::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        // Blank lines are dropped by the reader itself.
        match parse_row(&row) {
            Ok(record) => result.records.push(record),
            Err(reason) => result.skipped.push(SkippedRow {
                line: row.position().map(|p| p.line()).unwrap_or(fallback_line),
                content: row.iter().collect::<Vec<_>>().join(","),
                reason,
            }),
        }
    }

    result
}

/// Parse raw bytes. Valid UTF-8 is taken as is, anything else goes through
/// encoding detection.
pub fn parse_bytes_auto(bytes: &[u8]) -> ParseResult {
    let (encoding, content) = match std::str::from_utf8(bytes) {
        Ok(text) => ("utf-8".to_string(), text.to_string()),
        Err(_) => {
            let encoding = detect_encoding(bytes);
            let content = decode_content(bytes, &encoding);
            (encoding, content)
        }
    };

    ParseResult {
        encoding,
        ..parse_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Speaker, Topic, Date, Words
Alexander Abel, Internal Security, 2012-12-11, 911
Bernhard Belling, Coal Subsidies, 2013-11-05, 1210
Caesare Collins, Coal Subsidies, 2012-11-06, 1119
Alexander Abel, Education Policy, 2012-10-30, 5310
";

    #[test]
    fn test_header_is_skipped() {
        let result = parse_str(SAMPLE);

        assert_eq!(result.records.len(), 4);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].line, 1);
        assert_eq!(result.skipped[0].reason, RowError::InvalidDate("Date".into()));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let result = parse_str(SAMPLE);
        let first = &result.records[0];

        assert_eq!(first.speaker(), "Alexander Abel");
        assert_eq!(first.topic(), "Internal Security");
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2012, 12, 11).unwrap());
        assert_eq!(first.words(), 911);
    }

    #[test]
    fn test_file_order_is_kept() {
        let result = parse_str(SAMPLE);
        let speakers: Vec<&str> = result.records.iter().map(|r| r.speaker()).collect();

        assert_eq!(
            speakers,
            vec!["Alexander Abel", "Bernhard Belling", "Caesare Collins", "Alexander Abel"]
        );
    }

    #[test]
    fn test_invalid_words_skipped() {
        let csv = "Abel, Topic, 2013-01-01, many\nAbel, Topic, 2013-01-01, 7.5\nAbel, Topic, 2013-01-01, 7";
        let result = parse_str(csv);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.skipped[0].reason, RowError::InvalidWords("many".into()));
        assert_eq!(result.skipped[1].reason, RowError::InvalidWords("7.5".into()));
    }

    #[test]
    fn test_negative_words_are_kept() {
        let csv = "Bernhard Belling, Coal Subsidies, 2013-11-05, 1210
Dora Dorn, Internal Security, 2013-02-01, -5
Alexander Abel, Internal Security, 2012-12-11, 911";
        let result = parse_str(csv);

        assert_eq!(result.records.len(), 3);
        assert!(result.skipped.is_empty());
        assert_eq!(result.records[1].words(), -5);
    }

    #[test]
    fn test_invalid_date_skipped() {
        let csv = "Abel, Topic, 2013-02-30, 10\nAbel, Topic, 11.05.2013, 10";
        let result = parse_str(csv);

        assert!(result.records.is_empty());
        assert!(result
            .skipped
            .iter()
            .all(|s| matches!(s.reason, RowError::InvalidDate(_))));
    }

    #[test]
    fn test_short_rows_skipped() {
        let csv = "Abel, Topic, 2013-01-01\nBelling, Topic, 2013-01-01, 20";
        let result = parse_str(csv);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped[0].reason, RowError::MissingColumns { found: 3 });
        assert_eq!(result.skipped[0].content, "Abel,Topic,2013-01-01");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let result = parse_str("Abel, Topic, 2013-01-01, 20, extra, more");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].words(), 20);
    }

    #[test]
    fn test_quoted_values() {
        let result = parse_str(r#""Abel, Alexander","Budget, 2014",2013-01-01,20"#);

        assert_eq!(result.records[0].speaker(), "Abel, Alexander");
        assert_eq!(result.records[0].topic(), "Budget, 2014");
    }

    #[test]
    fn test_empty_content() {
        let result = parse_str("");
        assert!(result.records.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_latin1_decoding() {
        // "Müller,Energie,2013-01-01,5" in ISO-8859-1
        let mut bytes = vec![0x4D, 0xFC];
        bytes.extend_from_slice(b"ller,Energie,2013-01-01,5");
        let decoded = decode_content(&bytes, "iso-8859-1");

        assert!(decoded.starts_with("Müller"));
    }

    #[test]
    fn test_latin1_keeps_currency_sign() {
        // 0xA4 is the generic currency sign in latin1, not the euro sign
        assert_eq!(decode_content(&[0xA4], "iso-8859-1"), "¤");
        assert_eq!(decode_content(&[0x80], "windows-1252"), "€");
    }

    #[test]
    fn test_other_charsets_are_decoded() {
        // "ма" in KOI8-R
        assert_eq!(decode_content(&[0xCD, 0xC1], "KOI8-R"), "ма");
        assert_eq!(decode_content(b"plain", "no-such-charset"), "plain");
    }

    #[test]
    fn test_auto_parse_utf8() {
        let result = parse_bytes_auto("Jörg Jäger,Steuern,2013-06-01,300".as_bytes());

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].speaker(), "Jörg Jäger");
    }
}
