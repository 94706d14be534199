//! Quote-aware line splitting for CSV-like text
//!
//! This is deliberately not a full CSV reader: quoted fields cannot span
//! lines, and a doubled `""` inside quotes is not unescaped (each quote just
//! toggles the quoted state).

use crate::dataset::{Dataset, LoadError, Record};
use tracing::debug;

/// Split one line into fields.
///
/// Commas inside a double-quoted span do not close the field. Quote
/// characters are never copied into the output. Always returns at least one
/// field, so an empty line yields `[""]`.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// Parse a whole document: first non-blank line is the header row, every
/// later non-blank line is a record.
///
/// Records whose fields are all blank are dropped. Fails with
/// [`LoadError::EmptyDataset`] when no record survives.
pub fn parse_document(text: &str) -> Result<Dataset, LoadError> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let headers = match lines.next() {
        Some(line) => parse_line(line),
        None => return Err(LoadError::EmptyDataset),
    };

    let records: Vec<Record> = lines
        .map(parse_line)
        .filter(|fields| !is_blank_record(fields))
        .collect();

    debug!(
        columns = headers.len(),
        records = records.len(),
        "parsed document"
    );

    Dataset::new(headers, records)
}

/// True when every field is empty or whitespace-only
pub(crate) fn is_blank_record(fields: &[String]) -> bool {
    fields.iter().all(|field| field.trim().is_empty())
}

/// Join fields back into a line, quoting any field that contains a comma.
///
/// Inverse of [`parse_line`] for fields without embedded `"`.
pub fn format_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.contains(',') {
                format!("\"{}\"", field)
            } else {
                field.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_line_simple() {
        assert_eq!(parse_line("a,b,c"), strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_parse_line_empty_yields_one_field() {
        assert_eq!(parse_line(""), strings(&[""]));
    }

    #[test]
    fn test_parse_line_keeps_empty_fields() {
        assert_eq!(parse_line(",a,,"), strings(&["", "a", "", ""]));
    }

    #[test]
    fn test_parse_line_quoted_comma() {
        assert_eq!(
            parse_line("Ann,\"Acme, Inc.\",Eng"),
            strings(&["Ann", "Acme, Inc.", "Eng"])
        );
    }

    #[test]
    fn test_parse_line_quote_mid_field() {
        // Quotes toggle state anywhere, not only at field start
        assert_eq!(parse_line("ab\"c,d\"e,f"), strings(&["abc,de", "f"]));
    }

    #[test]
    fn test_parse_line_doubled_quote_not_unescaped() {
        assert_eq!(
            parse_line("\"say \"\"hi\"\"\",x"),
            strings(&["say hi", "x"])
        );
    }

    #[test]
    fn test_parse_line_unterminated_quote_swallows_rest() {
        assert_eq!(parse_line("a,\"b,c"), strings(&["a", "b,c"]));
    }

    #[test]
    fn test_parse_line_preserves_whitespace() {
        assert_eq!(parse_line(" a , b "), strings(&[" a ", " b "]));
    }

    #[test]
    fn test_format_line_roundtrip() {
        let cases = [
            strings(&["Ann", "http://a.com", "ann@x.com", "Acme", "Eng"]),
            strings(&["Bo", "Zenith, Ltd", "", "a,b,c"]),
            strings(&[""]),
            strings(&["", ""]),
            strings(&["only, commas, here"]),
        ];
        for fields in cases {
            assert_eq!(parse_line(&format_line(&fields)), fields);
        }
    }

    #[test]
    fn test_parse_document_basic() {
        let text = "Name,Company\nAnn,Acme\nBo,Zenith\n";
        let dataset = parse_document(text).unwrap();
        assert_eq!(dataset.headers(), &strings(&["Name", "Company"])[..]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.record(1).unwrap(), &strings(&["Bo", "Zenith"])[..]);
    }

    #[test]
    fn test_parse_document_skips_blank_lines_and_records() {
        let text = "\n   \nName,Company\n\nAnn,Acme\n , \n,,\nBo,Zenith\n\n";
        let dataset = parse_document(text).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.record(0).unwrap()[0], "Ann");
        assert_eq!(dataset.record(1).unwrap()[0], "Bo");
    }

    #[test]
    fn test_parse_document_strips_crlf() {
        let text = "Name,Company\r\nAnn,Acme\r\n";
        let dataset = parse_document(text).unwrap();
        assert_eq!(dataset.headers()[1], "Company");
        assert_eq!(dataset.record(0).unwrap()[1], "Acme");
    }

    #[test]
    fn test_parse_document_headers_only_is_empty() {
        assert!(matches!(
            parse_document("Name,Company\n"),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn test_parse_document_blank_text_is_empty() {
        assert!(matches!(parse_document(""), Err(LoadError::EmptyDataset)));
        assert!(matches!(
            parse_document("\n \n\t\n"),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn test_parse_document_ragged_rows_kept() {
        let text = "A,B,C\n1\n1,2,3,4\n";
        let dataset = parse_document(text).unwrap();
        assert_eq!(dataset.record(0).unwrap().len(), 1);
        assert_eq!(dataset.record(1).unwrap().len(), 4);
    }
}
