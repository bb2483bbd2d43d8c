//! Wire framing for the beamer's control protocol.
//!
//! Every command is the fixed 7-byte header followed by a 2-byte opcode,
//! written as a single 9-byte payload on a fresh connection. The device sends
//! nothing back, so there is no decode path.

/// Framing prefix shared by every command.
pub const HEADER: [u8; 7] = [0x05, 0x00, 0x06, 0x00, 0x00, 0x03, 0x00];

/// Full payload length: header plus opcode.
pub const PAYLOAD_LEN: usize = HEADER.len() + 2;

/// Build the wire payload for an opcode.
pub fn encode(opcode: [u8; 2]) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[..HEADER.len()].copy_from_slice(&HEADER);
    payload[HEADER.len()..].copy_from_slice(&opcode);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_header_then_opcode() {
        let payload = encode([0xfa, 0x13]);
        assert_eq!(payload.len(), 9);
        assert_eq!(&payload[..7], &HEADER);
        assert_eq!(&payload[7..], &[0xfa, 0x13]);
    }

    #[test]
    fn header_never_varies() {
        assert_eq!(
            encode([0x00, 0x00])[..7],
            encode([0xff, 0xff])[..7]
        );
    }
}
