use std::fmt;

use bytes::{Buf, BufMut, Bytes};

use crate::error::DnsError;
use crate::labels::{decode_name, encode_name};

/// DNS Question Section
/// Format: QNAME + QTYPE (2 bytes) + QCLASS (2 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String, // Domain name in trailing-dot form (e.g., "example.com.")
    pub qtype: u16,   // Query type (A, CNAME, etc.)
    pub qclass: u16,  // Query class (usually IN for Internet)
}

/// DNS Resource Record
/// Format: NAME + TYPE (2 bytes) + CLASS (2 bytes) + TTL (4 bytes) + RDLENGTH (2 bytes) + RDATA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String, // Owner name
    pub rtype: u16,   // Record type
    pub rclass: u16,  // Record class
    pub ttl: u32,     // Time to live in seconds
    pub data: Bytes,  // Encoded RDATA, length prefix added on the wire
}

/// Record types this server knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A = 1,     // IPv4 address
    NS = 2,    // Name server
    MD = 3,    // Mail destination (obsolete)
    MF = 4,    // Mail forwarder (obsolete)
    CNAME = 5, // Canonical name
    SOA = 6,   // Start of authority
    PTR = 12,  // Pointer record
    MX = 15,   // Mail exchange
    TXT = 16,  // Text record
}

impl RecordType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            3 => Some(RecordType::MD),
            4 => Some(RecordType::MF),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::MD => "MD",
            RecordType::MF => "MF",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Common DNS classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    IN = 1, // Internet
    CS = 2, // CSNET (obsolete)
    CH = 3, // CHAOS
    HS = 4, // Hesiod
}

impl RecordClass {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordClass::IN),
            2 => Some(RecordClass::CS),
            3 => Some(RecordClass::CH),
            4 => Some(RecordClass::HS),
            _ => None,
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordClass::IN => "IN",
            RecordClass::CS => "CS",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
        })
    }
}

impl DnsQuestion {
    /// Class mnemonic for logging, falling back to the number ("CLASS255")
    pub fn class_name(&self) -> String {
        RecordClass::from_u16(self.qclass)
            .map_or_else(|| format!("CLASS{}", self.qclass), |class| class.to_string())
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, DnsError> {
    let mut field = bytes
        .get(offset..offset + 2)
        .ok_or(DnsError::TruncatedMessage)?;
    Ok(field.get_u16())
}

impl DnsQuestion {
    /// Parse a DNS question from bytes starting at the given offset
    /// Returns the question and the new offset after parsing
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Result<(Self, usize), DnsError> {
        let rest = bytes.get(offset..).ok_or(DnsError::TruncatedMessage)?;
        let (name, read) = decode_name(rest)?;
        let new_offset = offset + read;

        let qtype = read_u16(bytes, new_offset)?;
        let qclass = read_u16(bytes, new_offset + 2)?;

        Ok((
            DnsQuestion {
                name,
                qtype,
                qclass,
            },
            new_offset + 4,
        ))
    }

    /// Append the wire form of the question
    pub fn write_to<B: BufMut>(&self, buf: &mut B) -> Result<(), DnsError> {
        encode_name(&self.name, buf)?;
        buf.put_u16(self.qtype);
        buf.put_u16(self.qclass);
        Ok(())
    }
}

impl ResourceRecord {
    /// Append the wire form of the record, RDLENGTH included
    pub fn write_to<B: BufMut>(&self, buf: &mut B) -> Result<(), DnsError> {
        let rdlength = u16::try_from(self.data.len())
            .map_err(|_| DnsError::RecordDataTooLong(self.data.len()))?;

        encode_name(&self.name, buf)?;
        buf.put_u16(self.rtype);
        buf.put_u16(self.rclass);
        buf.put_u32(self.ttl);
        buf.put_u16(rdlength);
        buf.put_slice(&self.data);
        Ok(())
    }
}
