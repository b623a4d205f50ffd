//! Per-type rdata codec.
//!
//! Types whose rdata carries a domain name share the enclosing message's
//! compression table on encode and may reference earlier names on decode.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::wire::{decode_name, encode_name, NameOffsets, RecordType};

/// SOA rdata: two compressible names followed by five u32 fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soa {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Decoded rdata, discriminated by the record type.
///
/// AAAA carries a typed address, so its textual form is the canonical
/// RFC 5952 rendering; the wire form is the 16 raw octets either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
    Cname(String),
    Soa(Soa),
    Txt(Vec<u8>),
    Opaque(Vec<u8>),
}

impl RData {
    pub(crate) fn encode(
        &self,
        buf: &mut Vec<u8>,
        offsets: &mut NameOffsets,
    ) -> Result<(), FormatError> {
        match self {
            RData::A(addr) => buf.extend_from_slice(&addr.octets()),
            RData::Aaaa(addr) => buf.extend_from_slice(&addr.octets()),
            RData::Ns(name) | RData::Cname(name) => encode_name(buf, name, offsets)?,
            RData::Soa(soa) => {
                encode_name(buf, &soa.mname, offsets)?;
                encode_name(buf, &soa.rname, offsets)?;
                for field in [soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum] {
                    buf.extend_from_slice(&field.to_be_bytes());
                }
            }
            RData::Txt(bytes) | RData::Opaque(bytes) => buf.extend_from_slice(bytes),
        }
        Ok(())
    }

    /// Decodes `rdlength` bytes of rdata at `start`. A parser that would
    /// consume more than `rdlength` fails; one that consumes less leaves
    /// the remainder to be discarded by the caller's cursor advance.
    pub(crate) fn decode(
        rtype: RecordType,
        buf: &[u8],
        start: usize,
        rdlength: u16,
    ) -> Result<RData, FormatError> {
        let end = start + rdlength as usize;
        if end > buf.len() {
            return Err(FormatError::Truncated("rdata"));
        }

        let rdata = match rtype {
            RecordType::A => {
                if rdlength < 4 {
                    return Err(FormatError::RdataOverrun(rdlength));
                }
                RData::A(Ipv4Addr::new(
                    buf[start],
                    buf[start + 1],
                    buf[start + 2],
                    buf[start + 3],
                ))
            }
            RecordType::Aaaa => {
                if rdlength < 16 {
                    return Err(FormatError::RdataOverrun(rdlength));
                }
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&buf[start..start + 16]);
                RData::Aaaa(Ipv6Addr::from(octets))
            }
            RecordType::Ns | RecordType::Cname => {
                let (name, next) = decode_name(buf, start)?;
                if next > end {
                    return Err(FormatError::RdataOverrun(rdlength));
                }
                if rtype == RecordType::Ns {
                    RData::Ns(name)
                } else {
                    RData::Cname(name)
                }
            }
            RecordType::Soa => {
                let (mname, next) = decode_name(buf, start)?;
                let (rname, next) = decode_name(buf, next)?;
                if next + 20 > end {
                    return Err(FormatError::RdataOverrun(rdlength));
                }
                let mut fields = [0u32; 5];
                for (i, field) in fields.iter_mut().enumerate() {
                    let at = next + i * 4;
                    *field = u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
                }
                RData::Soa(Soa {
                    mname,
                    rname,
                    serial: fields[0],
                    refresh: fields[1],
                    retry: fields[2],
                    expire: fields[3],
                    minimum: fields[4],
                })
            }
            RecordType::Txt => RData::Txt(buf[start..end].to_vec()),
            _ => RData::Opaque(buf[start..end].to_vec()),
        };
        Ok(rdata)
    }
}
