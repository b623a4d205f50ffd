//! Whole-message codec: header, questions, and the three record sections.

use crate::error::FormatError;
use crate::wire::{
    decode_name, encode_name, Header, Message, NameOffsets, Question, RData, Rcode, Record,
    RecordClass, RecordType, HEADER_LEN, MAX_DATAGRAM,
};

impl Header {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.id.to_be_bytes());
        let mut flags = 0u16;
        if self.qr {
            flags |= 1 << 15;
        }
        flags |= ((self.opcode & 0x0F) as u16) << 11;
        if self.aa {
            flags |= 1 << 10;
        }
        if self.tc {
            flags |= 1 << 9;
        }
        if self.rd {
            flags |= 1 << 8;
        }
        if self.ra {
            flags |= 1 << 7;
        }
        // z bits are always emitted as zero.
        flags |= (self.rcode.to_u8() & 0x0F) as u16;
        buf.extend_from_slice(&flags.to_be_bytes());
        for count in [self.qdcount, self.ancount, self.nscount, self.arcount] {
            buf.extend_from_slice(&count.to_be_bytes());
        }
    }

    fn decode(buf: &[u8]) -> Result<Header, FormatError> {
        if buf.len() < HEADER_LEN {
            return Err(FormatError::ShortMessage(buf.len()));
        }
        let flags = u16::from_be_bytes([buf[2], buf[3]]);
        Ok(Header {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            qr: flags & (1 << 15) != 0,
            opcode: ((flags >> 11) & 0x0F) as u8,
            aa: flags & (1 << 10) != 0,
            tc: flags & (1 << 9) != 0,
            rd: flags & (1 << 8) != 0,
            ra: flags & (1 << 7) != 0,
            z: ((flags >> 4) & 0x07) as u8,
            rcode: Rcode::from_u8((flags & 0x0F) as u8),
            qdcount: u16::from_be_bytes([buf[4], buf[5]]),
            ancount: u16::from_be_bytes([buf[6], buf[7]]),
            nscount: u16::from_be_bytes([buf[8], buf[9]]),
            arcount: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }
}

impl Question {
    fn encode(&self, buf: &mut Vec<u8>, offsets: &mut NameOffsets) -> Result<(), FormatError> {
        encode_name(buf, &self.name, offsets)?;
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
        Ok(())
    }

    fn decode(buf: &[u8], pos: usize) -> Result<(Question, usize), FormatError> {
        let (name, next) = decode_name(buf, pos)?;
        if next + 4 > buf.len() {
            return Err(FormatError::Truncated("question"));
        }
        let question = Question {
            name,
            qtype: RecordType::from_u16(u16::from_be_bytes([buf[next], buf[next + 1]])),
            qclass: RecordClass::from_u16(u16::from_be_bytes([buf[next + 2], buf[next + 3]])),
        };
        Ok((question, next + 4))
    }
}

impl Record {
    fn encode(&self, buf: &mut Vec<u8>, offsets: &mut NameOffsets) -> Result<(), FormatError> {
        encode_name(buf, &self.name, offsets)?;
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.class.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        // rdlength is patched in once the rdata is written.
        let rdlength_at = buf.len();
        buf.extend_from_slice(&[0, 0]);
        let rdata_start = buf.len();
        self.rdata.encode(buf, offsets)?;
        let rdlength = (buf.len() - rdata_start) as u16;
        buf[rdlength_at..rdlength_at + 2].copy_from_slice(&rdlength.to_be_bytes());
        Ok(())
    }

    fn decode(buf: &[u8], pos: usize) -> Result<(Record, usize), FormatError> {
        let (name, next) = decode_name(buf, pos)?;
        if next + 10 > buf.len() {
            return Err(FormatError::Truncated("record"));
        }
        let rtype = RecordType::from_u16(u16::from_be_bytes([buf[next], buf[next + 1]]));
        let class = RecordClass::from_u16(u16::from_be_bytes([buf[next + 2], buf[next + 3]]));
        let ttl = u32::from_be_bytes([buf[next + 4], buf[next + 5], buf[next + 6], buf[next + 7]]);
        let rdlength = u16::from_be_bytes([buf[next + 8], buf[next + 9]]);
        let rdata = RData::decode(rtype, buf, next + 10, rdlength)?;
        let record = Record {
            name,
            rtype,
            class,
            ttl,
            rdata,
        };
        Ok((record, next + 10 + rdlength as usize))
    }
}

impl Message {
    /// Encodes the message. Section counts are rewritten from the actual
    /// section lengths; a fresh compression table spans this call only.
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut buf = Vec::with_capacity(MAX_DATAGRAM);
        let mut offsets = NameOffsets::default();

        let mut header = self.header;
        header.qdcount = self.questions.len() as u16;
        header.ancount = self.answers.len() as u16;
        header.nscount = self.authorities.len() as u16;
        header.arcount = self.additionals.len() as u16;
        header.encode(&mut buf);

        for question in &self.questions {
            question.encode(&mut buf, &mut offsets)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.encode(&mut buf, &mut offsets)?;
        }
        Ok(buf)
    }

    /// Decodes a message. Requires the 12 byte header and at least one
    /// question; trailing bytes past the counted sections are ignored.
    pub fn decode(buf: &[u8]) -> Result<Message, FormatError> {
        let header = Header::decode(buf)?;
        if header.qdcount == 0 {
            return Err(FormatError::NoQuestion);
        }

        let mut pos = HEADER_LEN;
        let mut questions = Vec::with_capacity(header.qdcount as usize);
        for _ in 0..header.qdcount {
            let (question, next) = Question::decode(buf, pos)?;
            questions.push(question);
            pos = next;
        }

        let mut decode_section = |count: u16, pos: &mut usize| -> Result<Vec<Record>, FormatError> {
            let mut records = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let (record, next) = Record::decode(buf, *pos)?;
                records.push(record);
                *pos = next;
            }
            Ok(records)
        };

        let answers = decode_section(header.ancount, &mut pos)?;
        let authorities = decode_section(header.nscount, &mut pos)?;
        let additionals = decode_section(header.arcount, &mut pos)?;

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}
