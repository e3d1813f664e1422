use crate::model::Summary;
use crate::scalar::{Record, Scalar};

/// Decode recommendation CSV text into header-keyed rows.
///
/// Lines are trimmed and blank lines dropped before parsing. The first
/// remaining line is the header; fewer than two remaining lines means
/// there are no rows. Every line is split on its own, so one data line
/// always yields one row. Short rows read their missing trailing cells
/// as null.
pub fn decode_csv(text: &str) -> Vec<Record> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_line(header_line);

    lines
        .map(|line| {
            let mut cells = split_line(line).into_iter();
            headers
                .iter()
                .map(|header| {
                    let cell = cells.next().unwrap_or_default();
                    (header.clone(), Scalar::coerce(&cell))
                })
                .collect()
        })
        .collect()
}

/// Split one line on commas outside quotes.
///
/// A quote toggles quoting wherever it appears in a cell; inside quotes a
/// doubled quote is a literal quote. An unclosed quote runs to the end of
/// the line. Cells are trimmed.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

/// Decode one summary JSON document. The top level must be an object.
pub fn decode_json(text: &str) -> Result<Summary, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_csv_header_only_is_empty() {
        assert!(decode_csv("channel,recommended_spend\n").is_empty());
        assert!(decode_csv("").is_empty());
        assert!(decode_csv("\n  \n channel,pred_roas \n\n").is_empty());
    }

    #[test]
    fn test_decode_csv_coerces_cells_in_header_order() {
        let text = "channel,recommended_spend,pred_roas,enabled,notes\n\
                    Paid Search,125000.5,3.1250,true,\n\
                    Events,-20,0,FALSE,kept as text\n";
        let rows = decode_csv(text);
        assert_eq!(rows.len(), 2);

        let keys: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["channel", "recommended_spend", "pred_roas", "enabled", "notes"]);

        assert_eq!(rows[0]["channel"], Scalar::Text("Paid Search".to_string()));
        assert_eq!(rows[0]["recommended_spend"], Scalar::Number(125000.5));
        assert_eq!(rows[0]["pred_roas"], Scalar::Number(3.125));
        assert_eq!(rows[0]["enabled"], Scalar::Boolean(true));
        assert_eq!(rows[0]["notes"], Scalar::Null);

        assert_eq!(rows[1]["recommended_spend"], Scalar::Number(-20.0));
        assert_eq!(rows[1]["enabled"], Scalar::Boolean(false));
        assert_eq!(rows[1]["notes"], Scalar::Text("kept as text".to_string()));
    }

    #[test]
    fn test_decode_csv_quoted_cells() {
        let text = "channel,budget,note\n\
                    \"Events, Field\",\"10,000\",\"said \"\"hold\"\"\"\n";
        let rows = decode_csv(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["channel"], Scalar::Text("Events, Field".to_string()));
        assert_eq!(rows[0]["budget"], Scalar::Text("10,000".to_string()));
        assert_eq!(rows[0]["note"], Scalar::Text("said \"hold\"".to_string()));
    }

    #[test]
    fn test_decode_csv_unclosed_quote_stays_on_its_line() {
        let rows = decode_csv("channel,pred_roas\n\"Events,3\nSocial,2\nDisplay,1\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["channel"], Scalar::Text("Events,3".to_string()));
        assert_eq!(rows[0]["pred_roas"], Scalar::Null);
        assert_eq!(rows[1]["channel"], Scalar::Text("Social".to_string()));
        assert_eq!(rows[2]["pred_roas"], Scalar::Number(1.0));
    }

    #[test]
    fn test_decode_csv_quote_after_leading_space() {
        let rows = decode_csv("channel,note\nEvents, \"a,b\"\n");
        assert_eq!(rows[0]["channel"], Scalar::Text("Events".to_string()));
        assert_eq!(rows[0]["note"], Scalar::Text("a,b".to_string()));
    }

    #[test]
    fn test_decode_csv_quote_inside_cell_toggles() {
        let rows = decode_csv("channel,pred_roas\nPaid \"Search, Brand\",3\n");
        assert_eq!(rows[0]["channel"], Scalar::Text("Paid Search, Brand".to_string()));
        assert_eq!(rows[0]["pred_roas"], Scalar::Number(3.0));
    }

    #[test]
    fn test_split_line_escaped_quotes() {
        assert_eq!(
            split_line("\"a \"\"b\"\"\", c ,"),
            vec!["a \"b\"".to_string(), "c".to_string(), String::new()]
        );
    }

    #[test]
    fn test_decode_csv_blank_lines_and_crlf() {
        let text = "\r\nchannel,pred_cac\r\n\r\n  Webinars,410.25  \r\nSocial,88\r\n\r\n";
        let rows = decode_csv(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["channel"], Scalar::Text("Webinars".to_string()));
        assert_eq!(rows[0]["pred_cac"], Scalar::Number(410.25));
        assert_eq!(rows[1]["pred_cac"], Scalar::Number(88.0));
    }

    #[test]
    fn test_decode_csv_short_row_fills_null() {
        let rows = decode_csv("channel,min_spend,max_spend\nDisplay,100\n");
        assert_eq!(rows[0]["min_spend"], Scalar::Number(100.0));
        assert_eq!(rows[0]["max_spend"], Scalar::Null);
    }

    #[test]
    fn test_decode_json_passes_through_extra_keys() {
        let summary = decode_json(
            r#"{"client_id":"acme","overall_roas":3.2,"vendor_tag":"x","weights":{"roas":0.5}}"#,
        )
        .unwrap();
        assert_eq!(summary.overall_roas(), 3.2);
        assert_eq!(summary.get("vendor_tag").unwrap(), "x");
        assert!(summary.get("weights").unwrap().is_object());
    }

    #[test]
    fn test_decode_json_malformed_fails() {
        assert!(decode_json("{\"client_id\": ").is_err());
        assert!(decode_json("[1, 2, 3]").is_err());
    }
}
