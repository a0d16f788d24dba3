//! Word list import from spreadsheets, CSV and extracted document text

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

use crate::error::{QuizError, QuizResult};
use crate::word_store::RawEntry;

/// Parse a word list file, picking the parser from the extension
pub fn parse_file(file_path: &str) -> QuizResult<Vec<RawEntry>> {
    let path = Path::new(file_path);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" | "xlsm" | "ods" => parse_excel(file_path),
        "csv" => parse_csv(file_path),
        "txt" => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| QuizError::Import(format!("Failed to read text file: {}", e)))?;
            Ok(parse_text(&text))
        }
        _ => Err(QuizError::UnsupportedFileType(extension)),
    }
}

/// Column index mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub term: usize,
    pub pronunciation: Option<usize>,
    pub meaning: usize,
}

impl Default for ColumnMapping {
    /// term, pronunciation, meaning
    fn default() -> Self {
        Self {
            term: 0,
            pronunciation: Some(1),
            meaning: 2,
        }
    }
}

/// Detect column indices from header names, falling back to positional columns
fn detect_columns(headers: &[String]) -> ColumnMapping {
    let mut term = None;
    let mut pronunciation = None;
    let mut meaning = None;

    for (i, header) in headers.iter().enumerate() {
        match header.trim().to_lowercase().as_str() {
            "term" | "word" | "words" | "chinese" | "hanzi" | "vocabulary" => term = Some(i),
            "pronunciation" | "pinyin" | "reading" | "romanization" => pronunciation = Some(i),
            "meaning" | "meanings" | "definition" | "translation" | "vietnamese" => meaning = Some(i),
            _ => {}
        }
    }

    match (term, meaning) {
        (Some(term), Some(meaning)) => ColumnMapping {
            term,
            pronunciation,
            meaning,
        },
        _ => ColumnMapping::default(),
    }
}

fn row_to_entry(cells: &[String], mapping: &ColumnMapping) -> Option<RawEntry> {
    let cell = |i: usize| cells.get(i).map(|c| c.trim()).unwrap_or("");

    let term = cell(mapping.term);
    let meaning = cell(mapping.meaning);
    if term.is_empty() || meaning.is_empty() {
        return None;
    }

    let pronunciation = mapping.pronunciation.map(cell).filter(|p| !p.is_empty());
    Some(RawEntry::new(term, pronunciation, meaning))
}

/// Parse the first worksheet of a spreadsheet. The first row is the header.
pub fn parse_excel(file_path: &str) -> QuizResult<Vec<RawEntry>> {
    let mut workbook = open_workbook_auto(file_path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| QuizError::Import("No sheets found in spreadsheet".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows().map(|row| row.iter().map(get_cell_string).collect::<Vec<_>>());

    let headers = rows
        .next()
        .ok_or_else(|| QuizError::Import("Empty file - no header row".to_string()))?;
    let mapping = detect_columns(&headers);

    Ok(rows.filter_map(|row| row_to_entry(&row, &mapping)).collect())
}

/// Parse a CSV file with a header row
pub fn parse_csv(file_path: &str) -> QuizResult<Vec<RawEntry>> {
    let file = std::fs::File::open(file_path)
        .map_err(|e| QuizError::Import(format!("Failed to open CSV file: {}", e)))?;
    parse_csv_reader(file)
}

pub fn parse_csv_reader<R: Read>(source: R) -> QuizResult<Vec<RawEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mapping = detect_columns(&headers);

    let mut words = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        if let Some(entry) = row_to_entry(&cells, &mapping) {
            words.push(entry);
        }
    }

    Ok(words)
}

/// Parse text already extracted from a document or image.
///
/// Each line reads `term pronunciation meaning...`; the meaning may span
/// several whitespace-separated words. Lines with fewer than three parts are skipped.
pub fn parse_text(text: &str) -> Vec<RawEntry> {
    text.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return None;
            }
            Some(RawEntry::new(parts[0], Some(parts[1]), &parts[2..].join(" ")))
        })
        .collect()
}

/// Helper to extract string from a spreadsheet cell
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}
