//! Minimal CSV codec for the checksum snapshots and the comparison report
//!
//! Fields are quoted only when they have to be: when they contain the
//! delimiter, a quote, a line break, or start with whitespace. Quotes inside a
//! quoted field are doubled. Records are terminated by `\n`; the reader also
//! accepts `\r\n` and skips blank lines.

const DELIMITER: char = ',';
const QUOTE: char = '"';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    #[error("unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),
    #[error("unexpected character after closing quote on line {0}")]
    StrayQuote(usize),
}

fn needs_quotes(field: &str) -> bool {
    field.starts_with([' ', '\t'])
        || field.contains([DELIMITER, QUOTE, '\r', '\n'])
}

/// Encode one record as a complete line, including the trailing newline.
pub fn encode_record(fields: &[&str]) -> String {
    let mut line = String::new();

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }

        if needs_quotes(field) {
            line.push(QUOTE);
            line.push_str(&field.replace(QUOTE, "\"\""));
            line.push(QUOTE);
        } else {
            line.push_str(field);
        }
    }

    line.push('\n');
    line
}

pub fn parse_records(content: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    // whether anything has been read for the current record
    let mut started = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = line;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => {
                    in_quotes = false;
                    match chars.peek() {
                        None | Some(&DELIMITER) | Some(&'\n') | Some(&'\r') => {}
                        Some(_) => return Err(CsvError::StrayQuote(line)),
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
                started = true;
            }
            DELIMITER => {
                record.push(std::mem::take(&mut field));
                started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                if started {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                    started = false;
                }
            }
            _ => {
                field.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote(quote_line));
    }

    if started {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&["a.txt", "abc"], "a.txt,abc\n")]
    #[case(&["a,b.txt", "abc"], "\"a,b.txt\",abc\n")]
    #[case(&["say \"hi\".txt", ""], "\"say \"\"hi\"\".txt\",\n")]
    #[case(&[" padded", "x"], "\" padded\",x\n")]
    fn encodes_fields_quoting_only_when_needed(#[case] fields: &[&str], #[case] expected: &str) {
        assert_eq!(encode_record(fields), expected);
    }

    #[test]
    fn parses_quoted_fields_with_embedded_delimiters_and_newlines() {
        let content = "File Name,Checksum a\n\"x,y\",\"multi\nline\"\r\nplain,\n";

        let records = parse_records(content).unwrap();

        assert_eq!(
            records,
            vec![
                vec!["File Name".to_string(), "Checksum a".to_string()],
                vec!["x,y".to_string(), "multi\nline".to_string()],
                vec!["plain".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn skips_blank_lines_and_accepts_missing_final_newline() {
        let records = parse_records("\na,1\n\nb,2").unwrap();

        assert_eq!(
            records,
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn encoded_record_with_awkward_name_parses_back() {
        let fields = ["weird \"name\", with\ncomma", "0123"];
        let line = encode_record(&fields);

        let records = parse_records(&line).unwrap();

        assert_eq!(records, vec![fields.map(String::from).to_vec()]);
    }

    #[rstest]
    #[case("a,\"unterminated\n", CsvError::UnterminatedQuote(1))]
    #[case("ok,1\n\"bad\"x,1\n", CsvError::StrayQuote(2))]
    fn rejects_malformed_quoting(#[case] content: &str, #[case] expected: CsvError) {
        assert_eq!(parse_records(content), Err(expected));
    }
}
