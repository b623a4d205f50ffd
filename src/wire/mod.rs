//! DNS wire format: data model and codec.
//!
//! Messages follow RFC 1035 §4: a 12 byte header, then question entries and
//! resource records in answer, authority, and additional sections. Domain
//! names inside one message share a compression table scoped to a single
//! encode call.

mod message;
mod name;
mod rdata;

pub use rdata::{RData, Soa};

pub(crate) use name::{decode_name, encode_name, NameOffsets};

use serde::{Deserialize, Serialize};

/// Fixed DNS header length.
pub const HEADER_LEN: usize = 12;

/// Maximum DNS datagram accepted from clients (RFC 1035 §2.3.4).
pub const MAX_DATAGRAM: usize = 512;

/// Resource record type. The listed variants round-trip their rdata
/// semantically; anything else is carried as an opaque byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    Ns,
    Cname,
    Soa,
    Ptr,
    Mx,
    Txt,
    Aaaa,
    Unknown(u16),
}

impl RecordType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            12 => RecordType::Ptr,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            other => RecordType::Unknown(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Ptr => 12,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
            RecordType::Unknown(other) => other,
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    /// Parses the record types the resolver answers semantically. Case
    /// insensitive; everything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "NS" => Ok(RecordType::Ns),
            "CNAME" => Ok(RecordType::Cname),
            "SOA" => Ok(RecordType::Soa),
            "TXT" => Ok(RecordType::Txt),
            other => Err(format!("unsupported record type: {other}")),
        }
    }
}

/// Resource record class. The resolver only issues IN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordClass {
    In,
    Unknown(u16),
}

impl RecordClass {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => RecordClass::In,
            other => RecordClass::Unknown(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            RecordClass::In => 1,
            RecordClass::Unknown(other) => other,
        }
    }
}

/// Response code carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rcode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    Unknown(u8),
}

impl Rcode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Rcode::NoError,
            1 => Rcode::FormatError,
            2 => Rcode::ServerFailure,
            3 => Rcode::NameError,
            other => Rcode::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormatError => 1,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::Unknown(other) => other,
        }
    }
}

/// The 12 byte DNS message header.
///
/// The `z` bits are ignored on decode and always emitted as zero; the four
/// section counts are rewritten from the actual section lengths when a
/// message is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

/// A question section entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

/// A resource record. `rdlength` is never stored; it is computed from the
/// encoded rdata at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub rtype: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: RData,
}

/// A full DNS message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    /// Builds a single-question recursive query.
    pub fn query(id: u16, name: &str, qtype: RecordType) -> Self {
        Message {
            header: Header {
                id,
                qr: false,
                opcode: 0,
                aa: false,
                tc: false,
                rd: true,
                ra: false,
                z: 0,
                rcode: Rcode::NoError,
                qdcount: 1,
                ancount: 0,
                nscount: 0,
                arcount: 0,
            },
            questions: vec![Question {
                name: name.to_string(),
                qtype,
                qclass: RecordClass::In,
            }],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }
}
