// src/data_input/log_parser.rs

use byteorder::{BigEndian, ByteOrder};
use csv::ReaderBuilder;
use log::{debug, info};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::channel_names::channel_name;
use crate::constants::{BINARY_HEADER_SIZE, BINARY_LOG_EXTENSION, BINARY_RECORD_SIZE, CHANNEL_COUNT};
use crate::data_input::log_data::{Recording, Sample};
use crate::error::LogParseError;

/// On-disk flavour of a recording, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Binary,
    Text,
}

impl LogFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(BINARY_LOG_EXTENSION) => LogFormat::Binary,
            _ => LogFormat::Text,
        }
    }
}

/// Parses a recording file into channels.
///
/// `.dat` files use the big-endian binary layout, anything else is read as
/// comma-delimited text with the same field order. The file is read fully and
/// closed before the channels are built.
pub fn parse_log_file(input_file_path: &Path) -> Result<Recording, LogParseError> {
    let format = LogFormat::from_path(input_file_path);
    info!("Reading {:?} log '{}'", format, input_file_path.display());

    let (start_timestamp_ms, samples) = match format {
        LogFormat::Binary => {
            let bytes = fs::read(input_file_path)?;
            let (start, samples) = parse_binary_log(&bytes)?;
            (Some(start), samples)
        }
        LogFormat::Text => {
            let file = fs::File::open(input_file_path)?;
            (None, parse_text_log(file)?)
        }
    };

    info!("Finished reading {} samples.", samples.len());
    Ok(Recording::from_samples(
        input_file_path.to_path_buf(),
        start_timestamp_ms,
        &samples,
    ))
}

/// Decodes the binary layout: an i64 start timestamp (ms) followed by fixed-size
/// records of one i64 timestamp (ns) and ten f32 values, all big-endian.
///
/// A trailing partial record is dropped.
pub fn parse_binary_log(bytes: &[u8]) -> Result<(i64, Vec<Sample>), LogParseError> {
    if bytes.len() < BINARY_HEADER_SIZE {
        return Err(LogParseError::TruncatedHeader {
            len: bytes.len(),
            expected: BINARY_HEADER_SIZE,
        });
    }
    let start_timestamp_ms = BigEndian::read_i64(&bytes[..BINARY_HEADER_SIZE]);

    let body = &bytes[BINARY_HEADER_SIZE..];
    let records = body.chunks_exact(BINARY_RECORD_SIZE);
    let leftover = records.remainder().len();
    if leftover > 0 {
        debug!("Dropping {} trailing bytes of a partial record", leftover);
    }

    let samples = records
        .map(|record| {
            let mut sample: Sample = [0.0; CHANNEL_COUNT];
            sample[0] = BigEndian::read_i64(&record[..8]) as f64;
            for (value, raw) in sample[1..].iter_mut().zip(record[8..].chunks_exact(4)) {
                *value = BigEndian::read_f32(raw) as f64;
            }
            sample
        })
        .collect();

    Ok((start_timestamp_ms, samples))
}

/// Reads comma-delimited samples, one per line. Empty and whitespace-only lines
/// are skipped, and record indices in errors count samples only.
pub fn parse_text_log<R: Read>(reader: R) -> Result<Vec<Sample>, LogParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        let record_index = samples.len();
        if record.len() != CHANNEL_COUNT {
            return Err(LogParseError::FieldCount {
                record: record_index,
                expected: CHANNEL_COUNT,
                found: record.len(),
            });
        }

        let mut sample: Sample = [0.0; CHANNEL_COUNT];
        for (field_index, (value, text)) in sample.iter_mut().zip(record.iter()).enumerate() {
            *value = text.parse::<f64>().map_err(|_| LogParseError::InvalidField {
                record: record_index,
                field: channel_name(field_index),
                value: text.to_string(),
            })?;
        }
        samples.push(sample);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    fn binary_log(start_ms: i64, records: &[(i64, [f32; 10])]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_i64::<BigEndian>(start_ms).unwrap();
        for (ts, values) in records {
            buf.write_i64::<BigEndian>(*ts).unwrap();
            for v in values {
                buf.write_f32::<BigEndian>(*v).unwrap();
            }
        }
        buf
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(LogFormat::from_path(Path::new("a/b/2024-01-01.dat")), LogFormat::Binary);
        assert_eq!(LogFormat::from_path(Path::new("a/b/2024-01-01.csv")), LogFormat::Text);
        assert_eq!(LogFormat::from_path(Path::new("a/b/noext")), LogFormat::Text);
    }

    #[test]
    fn test_binary_record_size() {
        assert_eq!(BINARY_RECORD_SIZE, 48);
    }

    #[test]
    fn test_binary_values_match_injected() {
        let values = [0.1f32, -2.5, 3.0, 0.7, -0.3, 512.25, 97.0, 61.0, 3.3, 12.5];
        let bytes = binary_log(1_700_000_000_123, &[(123_456_789_000, values), (123_466_789_000, values)]);
        let (start, samples) = parse_binary_log(&bytes).unwrap();
        assert_eq!(start, 1_700_000_000_123);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0][0], 123_456_789_000.0);
        assert_eq!(samples[1][0], 123_466_789_000.0);
        for (parsed, injected) in samples[0][1..].iter().zip(values.iter()) {
            assert_eq!(*parsed, *injected as f64);
        }
    }

    #[test]
    fn test_binary_trailing_partial_record_dropped() {
        let mut bytes = binary_log(0, &[(1, [1.0; 10]), (2, [2.0; 10]), (3, [3.0; 10])]);
        bytes.extend_from_slice(&[0xAB; 47]);
        let (_, samples) = parse_binary_log(&bytes).unwrap();
        assert_eq!(samples.len(), (bytes.len() - BINARY_HEADER_SIZE) / BINARY_RECORD_SIZE);
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn test_binary_header_only() {
        let bytes = binary_log(99, &[]);
        let (start, samples) = parse_binary_log(&bytes).unwrap();
        assert_eq!(start, 99);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_binary_truncated_header() {
        let err = parse_binary_log(&[0u8; 5]).unwrap_err();
        assert!(matches!(err, LogParseError::TruncatedHeader { len: 5, expected: 8 }));
    }

    #[test]
    fn test_text_log_parses_lines() {
        let text = "1000000000,0.5,1,2,3,4,512,97,60,2.5,0.1\n\
                    2000000000, -0.5 ,1,2,3,4,513,98,61,2.6,0.2\n";
        let samples = parse_text_log(text.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1][0], 2.0e9);
        assert_eq!(samples[1][1], -0.5);
        assert_eq!(samples[1][10], 0.2);
    }

    #[test]
    fn test_text_log_skips_blank_lines() {
        let line = "1,2,3,4,5,6,7,8,9,10,11";
        let text = format!("{line}\r\n\r\n\n   \n\t\n{line}\r\n\n");
        let samples = parse_text_log(text.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1][10], 11.0);

        let broken = format!("{line}\n   \n1,2,3\n");
        match parse_text_log(broken.as_bytes()) {
            Err(LogParseError::FieldCount { record, .. }) => assert_eq!(record, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_text_log_invalid_field_names_record() {
        let text = "1,2,3,4,5,6,7,8,9,10,11\n1,2,3,4,5,6,abc,8,9,10,11\n";
        match parse_text_log(text.as_bytes()) {
            Err(LogParseError::InvalidField { record, field, value }) => {
                assert_eq!(record, 1);
                assert_eq!(field, "thermistor");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_text_log_wrong_field_count() {
        let text = "1,2,3\n";
        match parse_text_log(text.as_bytes()) {
            Err(LogParseError::FieldCount { record, expected, found }) => {
                assert_eq!(record, 0);
                assert_eq!(expected, CHANNEL_COUNT);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

// src/data_input/log_parser.rs
