use crate::dns_message::Message;
use crate::dns_question_and_answer::RecordType;
use crate::error::DnsError;
use crate::rdata::{AData, CnameData, RData};

/// Hardcoded answers handed out for every name
/// A questions get `address`, CNAME questions get `canonical_name`
#[derive(Debug, Clone)]
pub struct FixedAnswers {
    address: AData,
    canonical_name: CnameData,
}

impl FixedAnswers {
    /// Both values are encoded once here so a bad value is rejected at startup
    pub fn new(address: &str, canonical_name: &str) -> Result<Self, DnsError> {
        let address = AData::new(address);
        let canonical_name = CnameData::new(canonical_name);

        address.encode()?;
        canonical_name.encode()?;

        Ok(Self {
            address,
            canonical_name,
        })
    }

    /// Pick the record data variant for a question type
    pub fn rdata_for(&self, rtype: u16) -> Result<&dyn RData, DnsError> {
        match RecordType::from_u16(rtype) {
            Some(RecordType::A) => Ok(&self.address),
            Some(RecordType::CNAME) => Ok(&self.canonical_name),
            _ => Err(DnsError::UnsupportedType(rtype)),
        }
    }

    /// Answer the first question of `message`, if there is one
    /// The answer echoes the question's name, type and class
    pub fn answer(&self, message: &mut Message) -> Result<(), DnsError> {
        let Some(question) = message.questions.first().cloned() else {
            return Ok(());
        };

        let rdata = self.rdata_for(question.qtype)?;
        message.add_answer(&question.name, question.qtype, question.qclass, rdata)
    }
}

impl Default for FixedAnswers {
    fn default() -> Self {
        Self {
            address: AData::new("192.168.7.93"),
            canonical_name: CnameData::new("canonical.example.com."),
        }
    }
}
