//! SQL identifier quoting.
//!
//! Identifiers are quoted with the dialect's quote character: double quote
//! for the Postgres/SQL Server family, backtick for everything else. Dotted
//! names quote each part separately and `*` always passes through bare.
//! The builder trusts its inputs; quoting here is about reserved words and
//! case preservation, not injection-proofing arbitrary strings.

/// Resolve the identifier quote character for a driver name.
pub fn quote_char_for_driver(driver: &str) -> char {
    match driver {
        "pgsql" | "postgres" | "postgresql" | "sqlsrv" | "dblib" | "mssql" | "sybase"
        | "firebird" => '"',
        _ => '`',
    }
}

/// Quote a possibly-dotted identifier: `table.col` becomes
/// `` `table`.`col` ``. A `*` part is never quoted, so `t.*` renders as
/// `` `t`.* ``.
pub fn quote_identifier(ident: &str, quote: char) -> String {
    ident
        .split('.')
        .map(|part| quote_part(part, quote))
        .collect::<Vec<_>>()
        .join(".")
}

/// Quote a single identifier part, doubling any embedded quote character.
fn quote_part(part: &str, quote: char) -> String {
    if part == "*" {
        return part.to_string();
    }
    let mut out = String::with_capacity(part.len() + 2);
    out.push(quote);
    for c in part.chars() {
        out.push(c);
        if c == quote {
            out.push(quote);
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_for_mysql_and_sqlite() {
        assert_eq!(quote_char_for_driver("mysql"), '`');
        assert_eq!(quote_char_for_driver("sqlite"), '`');
        assert_eq!(quote_char_for_driver("unknown"), '`');
    }

    #[test]
    fn test_double_quote_for_postgres_family() {
        for driver in ["pgsql", "postgres", "sqlsrv", "dblib", "mssql", "sybase", "firebird"] {
            assert_eq!(quote_char_for_driver(driver), '"', "driver {}", driver);
        }
    }

    #[test]
    fn test_quotes_simple_identifier() {
        assert_eq!(quote_identifier("name", '`'), "`name`");
        assert_eq!(quote_identifier("name", '"'), "\"name\"");
    }

    #[test]
    fn test_quotes_each_dotted_part() {
        assert_eq!(quote_identifier("widget.name", '`'), "`widget`.`name`");
    }

    #[test]
    fn test_star_is_never_quoted() {
        assert_eq!(quote_identifier("*", '`'), "*");
        assert_eq!(quote_identifier("t.*", '`'), "`t`.*");
    }

    #[test]
    fn test_embedded_quote_char_is_doubled() {
        assert_eq!(quote_identifier("wei`rd", '`'), "`wei``rd`");
        assert_eq!(quote_identifier("wei\"rd", '"'), "\"wei\"\"rd\"");
    }
}
