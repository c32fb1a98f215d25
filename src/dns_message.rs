use bytes::{Bytes, BytesMut};

use crate::dns_header::{DnsFlags, DnsHeader, OpCode, HEADER_LEN};
use crate::dns_question_and_answer::{DnsQuestion, RecordType, ResourceRecord};
use crate::error::DnsError;
use crate::rdata::RData;

/// TTL given to every synthesized answer, in seconds
pub const ANSWER_TTL: u32 = 60;

/// One DNS packet
///
/// Decoding fills the header fields and the question section. The answer,
/// name server and additional sections are not parsed; their counts are kept
/// as read from the wire until the lists are touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u16,
    /// Flags word as received, echoed into the response header
    pub flags: u16,
    pub is_query: bool,
    pub is_response: bool,
    pub op_code: OpCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub name_server_count: u16,
    pub additional_count: u16,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<ResourceRecord>,
    pub name_servers: Vec<ResourceRecord>,
    pub extra: Vec<ResourceRecord>,
}

fn section_count<T>(section: &[T]) -> Result<u16, DnsError> {
    u16::try_from(section.len()).map_err(|_| DnsError::TooManyRecords)
}

impl Message {
    /// Parse a DNS packet
    /// Fails as a whole on the first malformed or truncated field
    pub fn decode(packet: &[u8]) -> Result<Self, DnsError> {
        let header = DnsHeader::from_bytes(packet)?;
        let flags = DnsFlags::from_u16(header.flags);

        let mut questions = Vec::new();
        let mut offset = HEADER_LEN;

        for _ in 0..header.question_count {
            let (question, new_offset) = DnsQuestion::from_bytes(packet, offset)?;
            questions.push(question);
            offset = new_offset;
        }

        Ok(Message {
            id: header.id,
            flags: header.flags,
            is_query: !flags.qr,
            is_response: flags.qr,
            op_code: flags.op_code(),
            question_count: header.question_count,
            answer_count: header.answer_count,
            name_server_count: header.authority_count,
            additional_count: header.additional_count,
            questions,
            answers: Vec::new(),
            name_servers: Vec::new(),
            extra: Vec::new(),
        })
    }

    /// Serialize the message as an authoritative response
    /// Header counts are taken from the lists being written
    pub fn encode(&self) -> Result<Bytes, DnsError> {
        let header = DnsHeader {
            id: self.id,
            flags: DnsFlags::from_u16(self.flags).into_response().to_u16(),
            question_count: section_count(&self.questions)?,
            answer_count: section_count(&self.answers)?,
            authority_count: section_count(&self.name_servers)?,
            additional_count: section_count(&self.extra)?,
        };

        let mut buf = BytesMut::with_capacity(512);
        header.write_to(&mut buf);

        for question in &self.questions {
            question.write_to(&mut buf)?;
        }

        for record in self
            .answers
            .iter()
            .chain(&self.name_servers)
            .chain(&self.extra)
        {
            record.write_to(&mut buf)?;
        }

        Ok(buf.freeze())
    }

    /// Encode `data` and append it as an answer with the fixed TTL
    /// Nothing is appended when encoding fails
    pub fn add_answer(
        &mut self,
        name: &str,
        rtype: u16,
        rclass: u16,
        data: &dyn RData,
    ) -> Result<(), DnsError> {
        if self.answers.len() >= u16::MAX as usize {
            return Err(DnsError::TooManyRecords);
        }

        let data = data.encode()?;

        self.answers.push(ResourceRecord {
            name: name.to_string(),
            rtype,
            rclass,
            ttl: ANSWER_TTL,
            data,
        });
        self.answer_count = self.answers.len() as u16;

        Ok(())
    }

    /// Mnemonic of the question's record type, or "" when it is not a known type
    pub fn question_type(&self, question: &DnsQuestion) -> &'static str {
        RecordType::from_u16(question.qtype).map_or("", RecordType::mnemonic)
    }
}

/// Put a query for `name` into `buf`, as a resolver would send it
#[cfg(test)]
pub(crate) fn write_query<B: bytes::BufMut>(
    buf: &mut B,
    id: u16,
    flags: u16,
    name: &str,
    qtype: u16,
) {
    let header = DnsHeader {
        id,
        flags,
        question_count: 1,
        answer_count: 0,
        authority_count: 0,
        additional_count: 0,
    };
    header.write_to(buf);

    let question = DnsQuestion {
        name: name.to_string(),
        qtype,
        qclass: 1,
    };
    question.write_to(buf).unwrap();
}
