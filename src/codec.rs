//! CSV line codec
//!
//! Splits a single CSV line into fields and escapes values for output. Quoted
//! fields may contain commas and doubled quotes; every parsed field is
//! trimmed. Multi-line quoted values are not supported on input, the import
//! pipeline splits on line terminators before fields are parsed.

/// Parse one CSV line into trimmed fields
///
/// ```
/// use ledger::codec::parse_line;
/// assert_eq!(parse_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
/// assert_eq!(parse_line(r#"a,"b""c",d"#), vec!["a", "b\"c", "d"]);
/// ```
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Escape a value for a CSV field
///
/// Values containing a comma, a quote or a line terminator are wrapped in
/// quotes with inner quotes doubled; anything else is returned unchanged.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// `escape_field` for optional values; `None` becomes an empty field
pub fn escape_opt(value: Option<&str>) -> String {
    value.map(escape_field).unwrap_or_default()
}
