// lib/src/storage_engine/storage_utils.rs

//! Row codec and transaction plumbing shared by the table implementations.

use bincode::{
    config::{self, BigEndian, Configuration, Fixint},
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{de::DeserializeOwned, Serialize};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
    TransactionalTree,
};
use sled::Tree;

use crate::errors::{Result, StoreError};

/// Provides a standard bincode configuration.
pub fn bincode_config() -> Configuration<BigEndian, Fixint> {
    config::standard()
        .with_big_endian()
        .with_fixed_int_encoding()
}

pub fn encode_row<T: Serialize>(row: &T) -> Result<Vec<u8>> {
    Ok(encode_to_vec(row, bincode_config())?)
}

pub fn decode_row<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (row, _): (T, usize) = decode_from_slice(bytes, bincode_config())?;
    Ok(row)
}

/// Big-endian keys keep sled's iteration order equal to id order.
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

pub fn id_from_bytes(bytes: &[u8]) -> Option<u64> {
    let array: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(array))
}

pub fn get_row<T: DeserializeOwned>(tree: &Tree, id: u64) -> Result<Option<T>> {
    match tree.get(id_key(id))? {
        Some(bytes) => Ok(Some(decode_row(&bytes)?)),
        None => Ok(None),
    }
}

/// Decodes every row of `tree` in key order.
pub fn scan_rows<T: DeserializeOwned>(tree: &Tree) -> Result<Vec<T>> {
    tree.iter()
        .values()
        .map(|value| decode_row(&value?))
        .collect()
}

/// Reasons a write transaction gives up; converted to `StoreError` once the
/// transaction has rolled back.
#[derive(Debug)]
pub(crate) enum TxAbort {
    UsernameTaken(String),
    EmailTaken(String),
    MissingReference { table: &'static str, id: u64 },
    NotFound(String),
    InvalidData(String),
    Codec(String),
}

impl From<TxAbort> for StoreError {
    fn from(abort: TxAbort) -> Self {
        match abort {
            TxAbort::UsernameTaken(name) => StoreError::UsernameTaken(name),
            TxAbort::EmailTaken(email) => StoreError::EmailTaken(email),
            TxAbort::MissingReference { table, id } => StoreError::MissingReference { table, id },
            TxAbort::NotFound(what) => StoreError::NotFound(what),
            TxAbort::InvalidData(msg) => StoreError::InvalidData(msg),
            TxAbort::Codec(msg) => StoreError::DatabaseError(format!("row codec failed: {}", msg)),
        }
    }
}

pub(crate) fn tx_result<T>(result: std::result::Result<T, TransactionError<TxAbort>>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(TransactionError::Abort(abort)) => Err(abort.into()),
        Err(TransactionError::Storage(err)) => Err(err.into()),
    }
}

pub(crate) fn tx_encode<T: Serialize>(row: &T) -> ConflictableTransactionResult<Vec<u8>, TxAbort> {
    encode_row(row).map_err(|e| ConflictableTransactionError::Abort(TxAbort::Codec(e.to_string())))
}

pub(crate) fn tx_decode<T: DeserializeOwned>(bytes: &[u8]) -> ConflictableTransactionResult<T, TxAbort> {
    decode_row(bytes).map_err(|e| ConflictableTransactionError::Abort(TxAbort::Codec(e.to_string())))
}

/// Fails the transaction unless `tree` holds a row under `id`.
pub(crate) fn tx_require(
    tree: &TransactionalTree,
    table: &'static str,
    id: u64,
) -> ConflictableTransactionResult<sled::IVec, TxAbort> {
    match tree.get(id_key(id))? {
        Some(bytes) => Ok(bytes),
        None => Err(ConflictableTransactionError::Abort(TxAbort::MissingReference { table, id })),
    }
}

/// Hands out the next dense id for `table`, starting at 1. Runs inside the
/// same transaction as the insert so a rolled-back write does not burn an id.
pub(crate) fn allocate_id(
    counters: &TransactionalTree,
    table: &str,
) -> ConflictableTransactionResult<u64, TxAbort> {
    let current = match counters.get(table)? {
        Some(bytes) => id_from_bytes(&bytes).ok_or_else(|| {
            ConflictableTransactionError::Abort(TxAbort::Codec(format!("corrupt counter for {}", table)))
        })?,
        None => 0,
    };
    let next = current + 1;
    counters.insert(table, id_key(next).to_vec())?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_keys_sort_numerically() {
        let mut keys = vec![id_key(300), id_key(2), id_key(10)];
        keys.sort();
        let ids: Vec<u64> = keys.iter().filter_map(|k| id_from_bytes(k)).collect();
        assert_eq!(ids, vec![2, 10, 300]);
    }

    #[test]
    fn id_from_bytes_rejects_wrong_width() {
        assert_eq!(id_from_bytes(&[1, 2, 3]), None);
    }
}
