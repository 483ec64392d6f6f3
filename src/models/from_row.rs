use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Params, Row};

/// Build a model from a result row, plus query helpers returning models.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn query_all<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Self>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>();
        rows
    }

    fn query_optional<P: Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> rusqlite::Result<Option<Self>> {
        conn.query_row(sql, params, Self::from_row).optional()
    }
}

/// Read a text column holding a stored enum key. Keys `parse` does not know
/// fail the row instead of falling back to a default.
pub fn enum_column<T>(
    row: &Row,
    column: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let value: String = row.get(column)?;
    parse(&value).ok_or_else(|| {
        let index = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("unknown {column} '{value}'").into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(conn: &Connection, value: &str) -> rusqlite::Result<u8> {
        conn.query_row("SELECT ?1 AS kind", [value], |row| {
            enum_column(row, "kind", |s| match s {
                "one" => Some(1),
                "two" => Some(2),
                _ => None,
            })
        })
    }

    #[test]
    fn test_enum_column_rejects_unknown_key() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(read(&conn, "two").unwrap(), 2);
        assert!(matches!(
            read(&conn, "three"),
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }
}
