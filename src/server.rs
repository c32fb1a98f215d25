use std::net::{SocketAddr, UdpSocket};

use bytes::Bytes;
use log::{debug, info, trace, warn};

use crate::dns_message::Message;
use crate::error::DnsError;
use crate::hexdump::xxd;
use crate::local::FixedAnswers;

/// Largest datagram read from a client
pub const MAX_DATAGRAM_LEN: usize = 512;

/// DNS Server that answers every query from a fixed set of records
pub struct DnsServer {
    socket: UdpSocket,
    answers: FixedAnswers,
}

/// Strip the zero padding left at the end of a receive buffer
pub fn trim_zero_padding(buf: &[u8]) -> &[u8] {
    let end = buf.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &buf[..end]
}

/// Decode a query, add the fixed answer and encode the response
/// Returns `None` for packets with QR set: replies from another server are
/// dropped rather than answered
pub fn handle_request(answers: &FixedAnswers, packet: &[u8]) -> Result<Option<Bytes>, DnsError> {
    trace!("request:\n{}", xxd(packet));

    let mut message = Message::decode(packet)?;

    if message.is_response {
        debug!("ignoring response message {:#06x}", message.id);
        return Ok(None);
    }

    debug!(
        "{} {:#06x}: {} questions, {} answers, {} authority, {} additional",
        message.op_code,
        message.id,
        message.question_count,
        message.answer_count,
        message.name_server_count,
        message.additional_count,
    );

    if let Some(question) = message.questions.first() {
        info!(
            "{} {} {}",
            question.name,
            question.class_name(),
            message.question_type(question)
        );
    }

    match answers.answer(&mut message) {
        Ok(()) => {}
        Err(DnsError::UnsupportedType(rtype)) => {
            debug!("no answer for record type {}", rtype);
        }
        Err(e) => return Err(e),
    }

    let response = message.encode()?;
    trace!("response:\n{}", xxd(&response));

    Ok(Some(response))
}

impl DnsServer {
    /// Create a new DNS server bound to the given address
    pub fn new(bind_addr: SocketAddr, answers: FixedAnswers) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(bind_addr)?;
        Ok(Self { socket, answers })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Run the DNS server main loop
    /// Listens for incoming requests and sends responses
    pub fn run(&self) {
        let mut buf = [0u8; MAX_DATAGRAM_LEN];

        loop {
            let (size, source) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) => {
                    warn!("error receiving data: {}", e);
                    continue;
                }
            };

            let packet = trim_zero_padding(&buf[..size]);
            if packet.is_empty() {
                trace!("empty datagram from {}", source);
                continue;
            }

            match handle_request(&self.answers, packet) {
                Ok(Some(response)) => {
                    if let Err(e) = self.socket.send_to(&response, source) {
                        warn!("failed to send response to {}: {}", source, e);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("dropping packet from {}: {}", source, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::dns_message::write_query;

    fn query(flags: u16, name: &str, qtype: u16) -> Vec<u8> {
        let mut packet = Vec::new();
        write_query(&mut packet, 0xABCD, flags, name, qtype);
        packet
    }

    #[test]
    fn test_trim_zero_padding() {
        assert_eq!(trim_zero_padding(&[1, 2, 0, 3, 0, 0]), &[1, 2, 0, 3]);
        assert_eq!(trim_zero_padding(&[0, 0, 0]), &[] as &[u8]);
        assert_eq!(trim_zero_padding(&[]), &[] as &[u8]);
    }

    #[test]
    fn test_handle_a_query() {
        let packet = query(0x0100, "host.example.com.", 1);
        let response = handle_request(&FixedAnswers::default(), &packet)
            .unwrap()
            .unwrap();

        let message = Message::decode(&response).unwrap();
        assert_eq!(message.id, 0xABCD);
        assert!(message.is_response);
        assert_eq!(message.flags, 0x8500);
        assert_eq!(message.answer_count, 1);
        assert!(response.ends_with(&[0, 4, 192, 168, 7, 93]));
    }

    #[test]
    fn test_handle_unsupported_type_still_responds() {
        let packet = query(0x0100, "example.com", 16);
        let response = handle_request(&FixedAnswers::default(), &packet)
            .unwrap()
            .unwrap();

        let message = Message::decode(&response).unwrap();
        assert_eq!(message.answer_count, 0);
        assert_eq!(message.questions[0].qtype, 16);
    }

    #[test]
    fn test_handle_ignores_responses() {
        let packet = query(0x8000, "example.com", 1);
        assert_eq!(handle_request(&FixedAnswers::default(), &packet), Ok(None));
    }

    #[test]
    fn test_handle_malformed_packet() {
        assert_eq!(
            handle_request(&FixedAnswers::default(), &[0x12, 0x34, 0x01]),
            Err(DnsError::MessageTooShort)
        );
    }

    #[test]
    fn test_server_answers_over_udp() {
        let server = DnsServer::new("127.0.0.1:0".parse().unwrap(), FixedAnswers::default())
            .unwrap();
        let server_addr = server.local_addr().unwrap();
        thread::spawn(move || server.run());

        let client = UdpSocket::bind("127.0.0.1:0").unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        client
            .send_to(&query(0x0100, "a.example.com.", 5), server_addr)
            .unwrap();

        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        let (size, _) = client.recv_from(&mut buf).unwrap();
        let message = Message::decode(&buf[..size]).unwrap();

        assert_eq!(message.id, 0xABCD);
        assert_eq!(message.answer_count, 1);
        assert!(buf[..size].ends_with(b"\x09canonical\x07example\x03com\x00"));
    }
}
