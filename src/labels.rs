use bytes::BufMut;

use crate::error::DnsError;

/// Longest label a simple length byte may announce. Length bytes with the two
/// high bits set (compression pointers) or the reserved `01` prefix all land
/// above this.
pub const MAX_LABEL_LEN: usize = 63;

/// Split a dotted domain name into labels ending with the empty terminator label
/// A trailing dot is optional: "example.com" and "example.com." give the same labels
pub fn split_name(name: &str) -> Vec<&str> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    let mut labels: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('.').collect()
    };
    labels.push("");

    labels
}

/// Encode labels as length-prefixed byte strings
/// Format: [len]bytes[len]bytes...[0]
/// An empty label terminates the name, so it is only accepted in last position.
/// A zero byte is written after the last label when the caller left it off.
pub fn encode_labels<B: BufMut>(labels: &[&str], buf: &mut B) -> Result<(), DnsError> {
    for (i, label) in labels.iter().enumerate() {
        if label.is_empty() {
            if i + 1 != labels.len() {
                return Err(DnsError::EmptyLabel);
            }
            buf.put_u8(0);
            return Ok(());
        }

        let label_bytes = label.as_bytes();
        if label_bytes.len() > MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong(label_bytes.len()));
        }

        buf.put_u8(label_bytes.len() as u8);
        buf.put_slice(label_bytes);
    }

    buf.put_u8(0);

    Ok(())
}

/// Encode a dotted domain name, always terminated by the root label
/// Example: "example.com" -> [7]example[3]com[0]
pub fn encode_name<B: BufMut>(name: &str, buf: &mut B) -> Result<(), DnsError> {
    encode_labels(&split_name(name), buf)
}

/// Decode a label sequence from the start of `raw`
/// Returns the labels followed by a final empty label, and the number of bytes consumed
/// (terminator included). Compression pointers are not followed.
/// Labels that are not UTF-8 or contain a '.' are rejected, since the dotted
/// name could not be encoded back to the same bytes.
pub fn decode_labels(raw: &[u8]) -> Result<(Vec<String>, usize), DnsError> {
    let mut labels = Vec::new();
    let mut cursor = 0;

    loop {
        let length = *raw.get(cursor).ok_or(DnsError::TruncatedMessage)? as usize;
        cursor += 1;

        if length == 0 {
            break;
        }

        if length > MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong(length));
        }

        let label = raw
            .get(cursor..cursor + length)
            .ok_or(DnsError::TruncatedMessage)?;
        let label = std::str::from_utf8(label).map_err(|_| DnsError::InvalidLabel)?;
        if label.contains('.') {
            return Err(DnsError::InvalidLabel);
        }
        labels.push(label.to_string());
        cursor += length;
    }

    labels.push(String::new());

    Ok((labels, cursor))
}

/// Decode a domain name in its trailing-dot form ("www.example.com.")
pub fn decode_name(raw: &[u8]) -> Result<(String, usize), DnsError> {
    let (labels, read) = decode_labels(raw)?;
    Ok((labels.join("."), read))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(labels: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_labels(labels, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_encode_labels() {
        assert_eq!(
            encoded(&["www", "example", "com", ""]),
            b"\x03www\x07example\x03com\x00".to_vec()
        );
    }

    #[test]
    fn test_encode_labels_without_terminator() {
        assert_eq!(encoded(&["example", "com"]), b"\x07example\x03com\x00".to_vec());
    }

    #[test]
    fn test_label_codec_idempotence() {
        let bytes = encoded(&["www", "example", "com", ""]);
        let (labels, read) = decode_labels(&bytes).unwrap();

        assert_eq!(labels, vec!["www", "example", "com", ""]);
        assert_eq!(read, bytes.len());
    }

    #[test]
    fn test_encode_name_trailing_dot_optional() {
        let mut with_dot = Vec::new();
        let mut without_dot = Vec::new();
        encode_name("canonical.example.com.", &mut with_dot).unwrap();
        encode_name("canonical.example.com", &mut without_dot).unwrap();

        assert_eq!(with_dot, b"\x09canonical\x07example\x03com\x00".to_vec());
        assert_eq!(with_dot, without_dot);
    }

    #[test]
    fn test_encode_root_name() {
        let mut root = Vec::new();
        let mut empty = Vec::new();
        encode_name(".", &mut root).unwrap();
        encode_name("", &mut empty).unwrap();

        assert_eq!(root, vec![0]);
        assert_eq!(empty, vec![0]);
    }

    #[test]
    fn test_encode_rejects_long_label() {
        let long = "a".repeat(64);
        let mut buf = Vec::new();

        assert_eq!(
            encode_labels(&[long.as_str(), ""], &mut buf),
            Err(DnsError::LabelTooLong(64))
        );
    }

    #[test]
    fn test_encode_rejects_empty_inner_label() {
        let mut buf = Vec::new();
        assert_eq!(encode_name("a..b", &mut buf), Err(DnsError::EmptyLabel));
    }

    #[test]
    fn test_decode_name_reports_bytes_consumed() {
        // trailing bytes after the terminator belong to the next field
        let bytes = b"\x07example\x03com\x00\x00\x01\x00\x01";
        let (name, read) = decode_name(bytes).unwrap();

        assert_eq!(name, "example.com.");
        assert_eq!(read, 13);
    }

    #[test]
    fn test_decode_truncated_label() {
        assert_eq!(
            decode_labels(b"\x07exam"),
            Err(DnsError::TruncatedMessage)
        );
    }

    #[test]
    fn test_decode_missing_terminator() {
        assert_eq!(
            decode_labels(b"\x03com"),
            Err(DnsError::TruncatedMessage)
        );
        assert_eq!(decode_labels(b""), Err(DnsError::TruncatedMessage));
    }

    #[test]
    fn test_decode_rejects_non_utf8_label() {
        assert_eq!(
            decode_labels(b"\x02\xff\xfe\x03com\x00"),
            Err(DnsError::InvalidLabel)
        );
    }

    #[test]
    fn test_decode_rejects_dot_inside_label() {
        assert_eq!(
            decode_labels(b"\x03a.b\x03com\x00"),
            Err(DnsError::InvalidLabel)
        );
    }

    #[test]
    fn test_decode_does_not_follow_pointers() {
        assert_eq!(
            decode_labels(&[0xC0, 0x0C]),
            Err(DnsError::LabelTooLong(0xC0))
        );
    }
}
