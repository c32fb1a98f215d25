use thiserror::Error;

/// Errors raised while decoding or encoding a DNS message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DnsError {
    #[error("message is shorter than the 12 byte header")]
    MessageTooShort,
    #[error("message ends before the field being read")]
    TruncatedMessage,
    #[error("label length {0} is not a valid simple label length")]
    LabelTooLong(usize),
    #[error("label bytes cannot be written back as a dotted name")]
    InvalidLabel,
    #[error("empty label inside a domain name")]
    EmptyLabel,
    #[error("invalid IPv4 address {0:?}")]
    InvalidAddress(String),
    #[error("no record data encoder for type {0}")]
    UnsupportedType(u16),
    #[error("record data of {0} bytes does not fit a 16-bit length")]
    RecordDataTooLong(usize),
    #[error("section holds more records than a 16-bit count allows")]
    TooManyRecords,
}
