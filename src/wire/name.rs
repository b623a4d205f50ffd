//! Domain name codec with RFC 1035 §4.1.4 label compression.

use rustc_hash::FxHashMap;

use crate::error::FormatError;

/// Offsets of names already emitted into the message being encoded, keyed
/// by lowercased FQDN suffix. Fresh per encode call.
pub(crate) type NameOffsets = FxHashMap<String, u16>;

const POINTER_MASK: u8 = 0xC0;
const MAX_LABEL: usize = 63;
const MAX_NAME: usize = 255;
/// Pointers are 14 bits; names past this offset are emitted uncompressed
/// and never recorded as targets.
const POINTER_LIMIT: usize = 0x4000;
/// Pointer chases allowed while decoding one name. A cycle therefore fails
/// in bounded time instead of spinning.
const MAX_POINTER_HOPS: usize = 255;

/// Appends `name` to `buf` in wire form, compressing against (and
/// recording into) `offsets`. An optional trailing dot is stripped; the
/// empty name encodes as the root.
pub(crate) fn encode_name(
    buf: &mut Vec<u8>,
    name: &str,
    offsets: &mut NameOffsets,
) -> Result<(), FormatError> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        buf.push(0);
        return Ok(());
    }

    let labels: Vec<&str> = name.split('.').collect();
    for label in &labels {
        if label.len() > MAX_LABEL {
            return Err(FormatError::LabelTooLong(label.len()));
        }
    }
    let wire_len = labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1;
    if wire_len > MAX_NAME {
        return Err(FormatError::NameTooLong(wire_len));
    }

    // Longest already-emitted suffix wins; anything before it is spelled
    // out as raw labels.
    let mut match_at = labels.len();
    let mut pointer = 0u16;
    for i in 0..labels.len() {
        let suffix = labels[i..].join(".").to_ascii_lowercase();
        if let Some(&offset) = offsets.get(&suffix) {
            match_at = i;
            pointer = offset;
            break;
        }
    }

    let start = buf.len();
    let mut label_offset = start;
    for (i, label) in labels[..match_at].iter().enumerate() {
        if label_offset < POINTER_LIMIT {
            let suffix = labels[i..].join(".").to_ascii_lowercase();
            offsets.entry(suffix).or_insert(label_offset as u16);
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
        label_offset += label.len() + 1;
    }

    if match_at < labels.len() {
        buf.extend_from_slice(&(0xC000 | pointer).to_be_bytes());
    } else {
        buf.push(0);
    }
    Ok(())
}

/// Decodes the name starting at `start` in `buf`.
///
/// Returns the name and the offset just past its representation in the
/// enclosing structure: a pointer advances the caller by two bytes and the
/// pointed-to bytes are not consumed from the caller's cursor.
pub(crate) fn decode_name(buf: &[u8], start: usize) -> Result<(String, usize), FormatError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = start;
    let mut caller_next: Option<usize> = None;
    let mut hops = 0usize;

    loop {
        let byte = *buf.get(pos).ok_or(FormatError::Truncated("name"))?;
        if byte & POINTER_MASK == POINTER_MASK {
            let low = *buf
                .get(pos + 1)
                .ok_or(FormatError::Truncated("compression pointer"))?;
            let target = (((byte & 0x3F) as usize) << 8) | low as usize;
            if target >= buf.len() {
                return Err(FormatError::PointerOutOfBounds {
                    offset: target,
                    len: buf.len(),
                });
            }
            hops += 1;
            if hops > MAX_POINTER_HOPS {
                return Err(FormatError::PointerLoop);
            }
            if caller_next.is_none() {
                caller_next = Some(pos + 2);
            }
            pos = target;
        } else if byte == 0 {
            pos += 1;
            break;
        } else if byte & POINTER_MASK != 0 {
            return Err(FormatError::ReservedLabel(byte));
        } else {
            let end = pos + 1 + byte as usize;
            if end > buf.len() {
                return Err(FormatError::Truncated("label"));
            }
            labels.push(String::from_utf8_lossy(&buf[pos + 1..end]).into_owned());
            pos = end;
        }
    }

    Ok((labels.join("."), caller_next.unwrap_or(pos)))
}
