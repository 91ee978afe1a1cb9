use thiserror::Error;

/// Longest display name the ledger format stores.
pub const MAX_NAME_LEN: usize = 50;

/// Highest PIN the ledger format stores (four digits).
pub const MAX_PIN: u16 = 9999;

/// One account line of the remote ledger: `id,pin,name,balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: String,
    pub pin: u16,
    pub name: String,
    pub balance: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected 4 comma-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: account id is empty")]
    EmptyId { line: usize },

    #[error("line {line}: pin {value:?} is not an integer")]
    InvalidPin { line: usize, value: String },

    #[error("line {line}: pin {pin} is out of range 0..={MAX_PIN}")]
    PinOutOfRange { line: usize, pin: u32 },

    #[error("line {line}: name is {len} chars, max is {MAX_NAME_LEN}")]
    NameTooLong { line: usize, len: usize },

    #[error("line {line}: balance {value:?} is not an integer")]
    InvalidBalance { line: usize, value: String },
}

/// Parses one `id,pin,name,balance` line. `lineno` is 1-based and only
/// used for error reporting.
///
/// A malformed line is a hard error. The format has no quoting or
/// escaping, so a comma inside a name shows up as a fifth field and is
/// rejected here.
pub fn parse_line(line: &str, lineno: usize) -> Result<AccountRecord, ParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 4 {
        return Err(ParseError::FieldCount {
            line: lineno,
            found: fields.len(),
        });
    }

    let id = fields[0];
    if id.is_empty() {
        return Err(ParseError::EmptyId { line: lineno });
    }

    let pin: u32 = fields[1].parse().map_err(|_| ParseError::InvalidPin {
        line: lineno,
        value: fields[1].to_string(),
    })?;
    if pin > u32::from(MAX_PIN) {
        return Err(ParseError::PinOutOfRange { line: lineno, pin });
    }

    let name = fields[2];
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ParseError::NameTooLong {
            line: lineno,
            len: name.chars().count(),
        });
    }

    let balance: i64 = fields[3].parse().map_err(|_| ParseError::InvalidBalance {
        line: lineno,
        value: fields[3].to_string(),
    })?;

    Ok(AccountRecord {
        id: id.to_string(),
        pin: pin as u16,
        name: name.to_string(),
        balance,
    })
}

/// Parses the whole ledger blob, preserving line order. Empty lines are
/// skipped; any malformed line rejects the whole ledger.
pub fn parse_ledger(blob: &str) -> Result<Vec<AccountRecord>, ParseError> {
    let mut records = Vec::new();
    for (idx, line) in blob.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        records.push(parse_line(line, idx + 1)?);
    }
    Ok(records)
}

/// Serializes records back to the ledger wire format, one line per
/// record in input order, each terminated by `\n`. Exact inverse of
/// [`parse_ledger`] for records whose fields are free of commas and
/// newlines.
pub fn serialize_ledger(records: &[AccountRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            record.id, record.pin, record.name, record.balance
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn record(id: &str, pin: u16, name: &str, balance: i64) -> AccountRecord {
        AccountRecord {
            id: id.to_string(),
            pin,
            name: name.to_string(),
            balance,
        }
    }

    #[test]
    fn parse_single_line() {
        assert_eq!(
            record("A1", 1234, "Alice", 500),
            parse_line("A1,1234,Alice,500", 1).unwrap(),
        );
    }

    #[test]
    fn parse_ledger_preserves_order() {
        let parsed = parse_ledger("B2,2,Bob,200\nA1,1,Alice,100\n").unwrap();
        assert_eq!(
            vec![record("B2", 2, "Bob", 200), record("A1", 1, "Alice", 100)],
            parsed,
        );
    }

    #[test]
    fn parse_ledger_skips_empty_lines() {
        let parsed = parse_ledger("\nA1,1,Alice,100\n\n\nB2,2,Bob,200\n\n").unwrap();
        assert_eq!(2, parsed.len());
    }

    #[test]
    fn parse_ledger_accepts_crlf() {
        let parsed = parse_ledger("A1,1,Alice,100\r\nB2,2,Bob,200\r\n").unwrap();
        assert_eq!(
            vec![record("A1", 1, "Alice", 100), record("B2", 2, "Bob", 200)],
            parsed,
        );
    }

    #[rstest]
    #[case::too_few("A1,1234,Alice", 3)]
    #[case::too_many("A1,1234,Ali,ce,500", 5)]
    #[case::lone_field("A1", 1)]
    fn rejects_wrong_field_count(#[case] line: &str, #[case] found: usize) {
        assert_eq!(
            ParseError::FieldCount { line: 7, found },
            parse_line(line, 7).unwrap_err(),
        );
    }

    #[test]
    fn rejects_non_integer_pin() {
        assert_eq!(
            ParseError::InvalidPin {
                line: 1,
                value: "12a4".to_string()
            },
            parse_line("A1,12a4,Alice,500", 1).unwrap_err(),
        );
    }

    #[test]
    fn rejects_pin_out_of_range() {
        assert_eq!(
            ParseError::PinOutOfRange { line: 1, pin: 10000 },
            parse_line("A1,10000,Alice,500", 1).unwrap_err(),
        );
        assert!(parse_line("A1,0,Alice,500", 1).is_ok());
        assert!(parse_line("A1,9999,Alice,500", 1).is_ok());
    }

    #[test]
    fn rejects_non_integer_balance() {
        assert_eq!(
            ParseError::InvalidBalance {
                line: 2,
                value: "lots".to_string()
            },
            parse_line("A1,1234,Alice,lots", 2).unwrap_err(),
        );
    }

    #[test]
    fn rejects_empty_id() {
        assert_eq!(
            ParseError::EmptyId { line: 1 },
            parse_line(",1234,Alice,500", 1).unwrap_err(),
        );
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(51);
        assert_eq!(
            ParseError::NameTooLong { line: 1, len: 51 },
            parse_line(&format!("A1,1234,{name},500"), 1).unwrap_err(),
        );
    }

    #[test]
    fn empty_name_is_allowed_by_the_codec() {
        // The service forbids renaming to "", but the wire format can
        // hold it and the codec round-trips it.
        assert_eq!(
            record("A1", 1234, "", 500),
            parse_line("A1,1234,,500", 1).unwrap(),
        );
    }

    #[test]
    fn malformed_line_rejects_whole_ledger() {
        let err = parse_ledger("A1,1,Alice,100\nB2,broken\nC3,3,Carol,300\n").unwrap_err();
        assert_eq!(ParseError::FieldCount { line: 2, found: 2 }, err);
    }

    #[test]
    fn serialize_matches_wire_format() {
        let blob = serialize_ledger(&[
            record("A1", 1234, "Alice", 500),
            record("B2", 2, "Bob", 200),
        ]);
        assert_eq!("A1,1234,Alice,500\nB2,2,Bob,200\n", blob);
    }

    #[test]
    fn serialize_empty_ledger_is_empty() {
        assert_eq!("", serialize_ledger(&[]));
    }

    #[test]
    fn round_trip() {
        let records = vec![
            record("A1", 1234, "Alice", 500),
            record("B2", 0, "", 0),
            record("C3", 9999, "Carol Jones", -42),
        ];
        assert_eq!(
            records,
            parse_ledger(&serialize_ledger(&records)).unwrap(),
        );
    }

    #[test]
    fn negative_balance_parses() {
        // Balances are conceptually non-negative but the codec does not
        // enforce it; only withdrawal checks do.
        assert_eq!(-5, parse_line("A1,1,Alice,-5", 1).unwrap().balance);
    }
}
