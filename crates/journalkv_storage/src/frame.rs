//! On-disk framing of write batches.
//!
//! Every batch applied to a [`crate::FileStore`] is appended as one frame:
//!
//! ```text
//! magic "JKVB" (4) | version u16 LE (2) | payload length u32 LE (4) | payload | crc32 u32 LE (4)
//! ```
//!
//! The CRC covers everything before it. The payload is an operation count
//! (u32 LE) followed by each operation: a tag byte (`1` set, `2` delete), the
//! key as a u32 LE length plus UTF-8 bytes, and for sets the value in the
//! same form.

use crate::batch::{BatchOp, WriteBatch};
use crate::error::{StorageError, StorageResult};

/// Magic bytes identifying a batch frame.
pub(crate) const FRAME_MAGIC: [u8; 4] = *b"JKVB";

/// Current frame format version.
pub(crate) const FRAME_VERSION: u16 = 1;

/// magic (4) + version (2) + length (4) = 10 bytes
pub(crate) const HEADER_SIZE: usize = 10;

/// CRC size.
pub(crate) const CRC_SIZE: usize = 4;

/// Largest payload a frame can describe.
pub(crate) const MAX_PAYLOAD_SIZE: usize = u32::MAX as usize;

const TAG_SET: u8 = 1;
const TAG_DELETE: u8 = 2;

/// Encodes `batch` as a complete frame.
///
/// # Errors
///
/// Returns [`StorageError::BatchTooLarge`] if any length does not fit the
/// frame's u32 fields.
pub(crate) fn encode_frame(batch: &WriteBatch) -> StorageResult<Vec<u8>> {
    let payload = encode_payload(batch)?;
    let len = u32::try_from(payload.len()).map_err(|_| StorageError::BatchTooLarge {
        size: payload.len(),
        max: MAX_PAYLOAD_SIZE,
    })?;

    let mut data = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    data.extend_from_slice(&FRAME_MAGIC);
    data.extend_from_slice(&FRAME_VERSION.to_le_bytes());
    data.extend_from_slice(&len.to_le_bytes());
    data.extend_from_slice(&payload);

    let crc = compute_crc32(&data);
    data.extend_from_slice(&crc.to_le_bytes());
    Ok(data)
}

fn encode_payload(batch: &WriteBatch) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    put_len(&mut buf, batch.len())?;

    for op in batch.ops() {
        match op {
            BatchOp::Set { key, value } => {
                buf.push(TAG_SET);
                put_str(&mut buf, key)?;
                put_str(&mut buf, value)?;
            }
            BatchOp::Delete { key } => {
                buf.push(TAG_DELETE);
                put_str(&mut buf, key)?;
            }
        }
    }

    Ok(buf)
}

fn put_len(buf: &mut Vec<u8>, len: usize) -> StorageResult<()> {
    let len = u32::try_from(len).map_err(|_| StorageError::BatchTooLarge {
        size: len,
        max: MAX_PAYLOAD_SIZE,
    })?;
    buf.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

fn put_str(buf: &mut Vec<u8>, s: &str) -> StorageResult<()> {
    put_len(buf, s.len())?;
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Reads the frame at the start of `data`.
///
/// Returns `Ok(None)` if `data` ends before the frame does, which is how a
/// torn trailing write looks. Returns the decoded batch and the number of
/// bytes consumed otherwise.
///
/// # Errors
///
/// Returns [`StorageError::Corrupted`] for bad magic, an unknown version, a
/// CRC mismatch, or a malformed payload.
pub(crate) fn read_frame(data: &[u8]) -> StorageResult<Option<(WriteBatch, usize)>> {
    if data.len() < HEADER_SIZE {
        return Ok(None);
    }

    if data[0..4] != FRAME_MAGIC {
        return Err(StorageError::corrupted("invalid frame magic"));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != FRAME_VERSION {
        return Err(StorageError::corrupted(format!(
            "unsupported frame version {version}"
        )));
    }

    let len = u32::from_le_bytes([data[6], data[7], data[8], data[9]]) as usize;
    let total = HEADER_SIZE + len + CRC_SIZE;
    if data.len() < total {
        return Ok(None);
    }

    let body_end = HEADER_SIZE + len;
    let expected = u32::from_le_bytes([
        data[body_end],
        data[body_end + 1],
        data[body_end + 2],
        data[body_end + 3],
    ]);
    let actual = compute_crc32(&data[..body_end]);
    if expected != actual {
        return Err(StorageError::corrupted(format!(
            "checksum mismatch: expected {expected:08x}, got {actual:08x}"
        )));
    }

    let batch = decode_payload(&data[HEADER_SIZE..body_end])?;
    Ok(Some((batch, total)))
}

fn decode_payload(payload: &[u8]) -> StorageResult<WriteBatch> {
    let mut cursor = 0;

    let read_u32 = |cursor: &mut usize| -> StorageResult<u32> {
        if *cursor + 4 > payload.len() {
            return Err(StorageError::corrupted("unexpected end of payload"));
        }
        let bytes: [u8; 4] = payload[*cursor..*cursor + 4]
            .try_into()
            .map_err(|_| StorageError::corrupted("invalid u32"))?;
        *cursor += 4;
        Ok(u32::from_le_bytes(bytes))
    };

    let read_str = |cursor: &mut usize| -> StorageResult<String> {
        let len = read_u32(cursor)? as usize;
        if *cursor + len > payload.len() {
            return Err(StorageError::corrupted("unexpected end of string"));
        }
        let s = std::str::from_utf8(&payload[*cursor..*cursor + len])
            .map_err(|e| StorageError::corrupted(format!("invalid UTF-8 in batch: {e}")))?
            .to_owned();
        *cursor += len;
        Ok(s)
    };

    let count = read_u32(&mut cursor)?;
    let mut batch = WriteBatch::new();

    for _ in 0..count {
        let Some(&tag) = payload.get(cursor) else {
            return Err(StorageError::corrupted("unexpected end of payload"));
        };
        cursor += 1;

        match tag {
            TAG_SET => {
                let key = read_str(&mut cursor)?;
                let value = read_str(&mut cursor)?;
                batch.set(key, value);
            }
            TAG_DELETE => {
                let key = read_str(&mut cursor)?;
                batch.delete(key);
            }
            other => {
                return Err(StorageError::corrupted(format!(
                    "unknown batch operation tag {other}"
                )));
            }
        }
    }

    if cursor != payload.len() {
        return Err(StorageError::corrupted(format!(
            "trailing bytes in batch: expected {} bytes, got {}",
            cursor,
            payload.len()
        )));
    }

    Ok(batch)
}

/// Computes CRC32 checksum for data.
pub(crate) fn compute_crc32(data: &[u8]) -> u32 {
    // IEEE polynomial, reflected
    const CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut j = 0;
            while j < 8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ 0xEDB8_8320;
                } else {
                    crc >>= 1;
                }
                j += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    };

    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    !crc
}
