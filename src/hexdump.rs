use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Render bytes the way `xxd` does: offset, hex bytes, printable ASCII
pub fn xxd(bytes: &[u8]) -> String {
    let mut out = String::new();

    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if line > 0 {
            out.push('\n');
        }

        let _ = write!(out, "{:07x}: ", line * BYTES_PER_LINE);
        for byte in chunk {
            let _ = write!(out, "{:02x} ", byte);
        }
        for _ in chunk.len()..BYTES_PER_LINE {
            out.push_str("   ");
        }

        out.push(' ');
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
    }

    out
}
