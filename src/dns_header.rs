use std::fmt;

use bytes::{Buf, BufMut};

use crate::error::DnsError;

/// Size of the fixed DNS header in bytes
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

const QR: u16 = 1 << 15;
const AA: u16 = 1 << 10;
const TC: u16 = 1 << 9;
const RD: u16 = 1 << 8;
const RA: u16 = 1 << 7;

/// The header flags word split into its fields
/// Layout: QR(1) OPCODE(4) AA(1) TC(1) RD(1) RA(1) Z(3) RCODE(4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsFlags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
}

/// Kind of query, taken from the 4-bit opcode field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Query,
    IQuery,
    Status,
    Reserved(u8),
}

impl OpCode {
    pub fn from_u8(value: u8) -> Self {
        match value & 0xF {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            other => OpCode::Reserved(other),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Query => f.write_str("QUERY"),
            OpCode::IQuery => f.write_str("IQUERY"),
            OpCode::Status => f.write_str("STATUS"),
            OpCode::Reserved(value) => write!(f, "OPCODE{}", value),
        }
    }
}

impl DnsFlags {
    pub fn to_u16(&self) -> u16 {
        let bit = |set: bool, mask: u16| if set { mask } else { 0 };

        bit(self.qr, QR)
            | (self.opcode as u16 & 0xF) << 11
            | bit(self.aa, AA)
            | bit(self.tc, TC)
            | bit(self.rd, RD)
            | bit(self.ra, RA)
            | (self.z as u16 & 0x7) << 4
            | self.rcode as u16 & 0xF
    }

    pub fn from_u16(flags: u16) -> Self {
        DnsFlags {
            qr: flags & QR != 0,
            opcode: ((flags >> 11) & 0xF) as u8,
            aa: flags & AA != 0,
            tc: flags & TC != 0,
            rd: flags & RD != 0,
            ra: flags & RA != 0,
            z: ((flags >> 4) & 0x7) as u8,
            rcode: (flags & 0xF) as u8,
        }
    }

    pub fn op_code(&self) -> OpCode {
        OpCode::from_u8(self.opcode)
    }

    /// Flags for an authoritative response to a query carrying these flags
    /// Only QR and AA change; RD, RCODE and the rest are echoed
    pub fn into_response(self) -> Self {
        DnsFlags {
            qr: true,
            aa: true,
            ..self
        }
    }
}

impl DnsHeader {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnsError> {
        if bytes.len() < HEADER_LEN {
            return Err(DnsError::MessageTooShort);
        }

        let mut buf = &bytes[..HEADER_LEN];

        Ok(DnsHeader {
            id: buf.get_u16(),
            flags: buf.get_u16(),
            question_count: buf.get_u16(),
            answer_count: buf.get_u16(),
            authority_count: buf.get_u16(),
            additional_count: buf.get_u16(),
        })
    }

    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u16(self.id);
        buf.put_u16(self.flags);
        buf.put_u16(self.question_count);
        buf.put_u16(self.answer_count);
        buf.put_u16(self.authority_count);
        buf.put_u16(self.additional_count);
    }
}
