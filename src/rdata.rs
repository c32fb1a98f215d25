use bytes::{BufMut, Bytes, BytesMut};

use crate::error::DnsError;
use crate::labels::encode_name;

/// Encodes the RDATA payload of one record type
/// The 16-bit length prefix is added by the record writer, not here
pub trait RData {
    fn encode(&self) -> Result<Bytes, DnsError>;
}

/// A record: a dotted-decimal IPv4 address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AData {
    pub ip_addr: String,
}

/// CNAME record: the canonical domain name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameData {
    pub name: String,
}

impl AData {
    pub fn new(ip_addr: impl Into<String>) -> Self {
        AData {
            ip_addr: ip_addr.into(),
        }
    }
}

impl CnameData {
    pub fn new(name: impl Into<String>) -> Self {
        CnameData { name: name.into() }
    }
}

fn parse_octet(component: &str) -> Option<u8> {
    // u8::from_str accepts a leading '+', which is not part of dotted-decimal
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

impl RData for AData {
    fn encode(&self) -> Result<Bytes, DnsError> {
        let invalid = || DnsError::InvalidAddress(self.ip_addr.clone());

        let mut octets = BytesMut::with_capacity(4);
        for component in self.ip_addr.split('.') {
            if octets.len() == 4 {
                return Err(invalid());
            }
            octets.put_u8(parse_octet(component).ok_or_else(invalid)?);
        }

        if octets.len() != 4 {
            return Err(invalid());
        }

        Ok(octets.freeze())
    }
}

impl RData for CnameData {
    fn encode(&self) -> Result<Bytes, DnsError> {
        let mut buf = BytesMut::new();
        encode_name(&self.name, &mut buf)?;
        Ok(buf.freeze())
    }
}
