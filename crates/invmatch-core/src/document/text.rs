//! Line readers for plain-text and CSV documents.

use crate::error::ExtractionError;

const BOM: char = '\u{feff}';

/// Split text on universal line boundaries.
///
/// Recognizes `\n`, `\r\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL, and the Unicode line and paragraph separators. A trailing
/// boundary does not produce a trailing empty line, so OCR output ending in a
/// form feed yields no phantom line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
                | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }

        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                end = j + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Lines of a UTF-8 text document, trimmed, empties dropped.
///
/// Only `\n`, `\r` and `\r\n` end a line here; form feeds and the other
/// separators recognized by [`split_lines`] stay inside the line.
pub fn text_lines(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let text = String::from_utf8(data.to_vec())?;
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    // "\r\n" leaves an empty piece between the two, dropped below
    Ok(text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// First column of every CSV row. No header row is assumed; rows whose first
/// cell is missing or empty are skipped. Cells are kept verbatim.
pub fn csv_first_column(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let data = data.strip_prefix("\u{feff}".as_bytes()).unwrap_or(data);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut lines = Vec::new();
    for record in rdr.records() {
        let record = record?;
        match record.get(0) {
            Some(cell) if !cell.is_empty() => lines.push(cell.to_string()),
            _ => {}
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_boundaries() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("紅茶 3\n綠茶 2\n\u{0c}"), vec!["紅茶 3", "綠茶 2", ""]);
        assert_eq!(split_lines("x\u{2028}y"), vec!["x", "y"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_text_lines_trim_and_drop_empty() {
        let data = "\u{feff}  客戶代號: C01 (大同)  \r\n\r\n\t紅茶 3\n   \n";
        assert_eq!(
            text_lines(data.as_bytes()).unwrap(),
            vec!["客戶代號: C01 (大同)", "紅茶 3"]
        );
    }

    #[test]
    fn test_text_lines_only_break_on_newlines() {
        let data = "紅茶 3\u{0c}綠茶 2\r\n奶茶\u{2028}1\r咖啡\n";
        assert_eq!(
            text_lines(data.as_bytes()).unwrap(),
            vec!["紅茶 3\u{0c}綠茶 2", "奶茶\u{2028}1", "咖啡"]
        );
    }

    #[test]
    fn test_text_lines_invalid_utf8() {
        assert!(matches!(
            text_lines(&[0xff, 0xfe, 0x00]),
            Err(ExtractionError::Encoding(_))
        ));
    }

    #[test]
    fn test_csv_first_column() {
        let data = "蘋果汁330ml,5,25\n,7\n紅茶\n\"綠茶, 大\",2\n";
        assert_eq!(
            csv_first_column(data.as_bytes()).unwrap(),
            vec!["蘋果汁330ml", "紅茶", "綠茶, 大"]
        );
    }
}
