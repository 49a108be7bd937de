use serde::{Deserialize, Deserializer};

/// Per-instrument record of a batch response.
///
/// Batch endpoints answer HTTP 200 even when some instruments fail; the
/// failure travels as an `error` string on the record. When it is set the
/// record's rows must be treated as absent.
pub trait BatchRecord {
    fn instrument_id(&self) -> i64;

    fn error(&self) -> Option<&str>;

    fn is_ok(&self) -> bool {
        self.error().is_none()
    }
}

/// Split batch records into successful ones and `(instrument, error)` pairs.
pub fn partition_errors<R: BatchRecord>(records: Vec<R>) -> (Vec<R>, Vec<(i64, String)>) {
    let mut ok = Vec::with_capacity(records.len());
    let mut failed = Vec::new();
    for record in records {
        match record.error() {
            Some(error) => failed.push((record.instrument_id(), error.to_owned())),
            None => ok.push(record),
        }
    }
    (ok, failed)
}

/// Rows of a batch record, unless the server attached an error to it.
pub(crate) fn rows_or_error<'a, T>(
    error: Option<&'a str>,
    rows: &'a [T],
) -> Result<&'a [T], &'a str> {
    match error {
        Some(error) => Err(error),
        None => Ok(rows),
    }
}

/// Deserialize a list that may be absent or `null` into an empty `Vec`.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
