use crate::errors::{Error, Result};
use xc_instruction::{Opcode, OpcodeVersion, XCode, XCODE_SIZE};

/// Decodes the 9-byte record starting at `offset`: one opcode byte followed
/// by two little-endian u32 operands. A pure function of the window; the
/// surrounding stream is never consulted.
pub fn decode_one(image: &[u8], offset: u32, version: OpcodeVersion) -> Result<XCode> {
    let start = offset as usize;
    let window = image
        .get(start..start + XCODE_SIZE as usize)
        .ok_or(Error::UnexpectedEndOfImage { offset })?;

    let opcode = Opcode::from_byte(window[0], version);
    let first = u32::from_le_bytes([window[1], window[2], window[3], window[4]]);
    let second = u32::from_le_bytes([window[5], window[6], window[7], window[8]]);

    // The LateDebug interpreter stores its operands in the opposite order on
    // the wire.
    let (operand_one, operand_two) = match version {
        OpcodeVersion::LateDebug => (second, first),
        _ => (first, second),
    };

    Ok(XCode::new(opcode, operand_one, operand_two, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xc_instruction::{OpcodeKind, OpcodeType};

    fn record(opcode: u8, operand_one: u32, operand_two: u32) -> Vec<u8> {
        let mut bytes = vec![opcode];
        bytes.extend_from_slice(&operand_one.to_le_bytes());
        bytes.extend_from_slice(&operand_two.to_le_bytes());
        bytes
    }

    #[test]
    fn decodes_retail_record() {
        let bytes = record(0x02, 0x0F00_0000, 0x1234_5678);
        let xcode = decode_one(&bytes, 0, OpcodeVersion::Retail).unwrap();

        assert_eq!(xcode.opcode.kind(), OpcodeKind::Known(OpcodeType::MemRead));
        assert_eq!(xcode.operand_one, 0x0F00_0000);
        assert_eq!(xcode.operand_two, 0x1234_5678);
        assert_eq!(xcode.offset, 0);
    }

    #[test]
    fn late_debug_swaps_operand_order() {
        let bytes = record(0x09, 0x1111_1111, 0x2222_2222);
        let xcode = decode_one(&bytes, 0, OpcodeVersion::LateDebug).unwrap();

        assert_eq!(xcode.opcode.kind(), OpcodeKind::Known(OpcodeType::MemRead));
        assert_eq!(xcode.operand_one, 0x2222_2222);
        assert_eq!(xcode.operand_two, 0x1111_1111);
    }

    #[test]
    fn decoding_is_pure() {
        let mut bytes = vec![0xAA; 32];
        bytes[4..13].copy_from_slice(&record(0x07, 0x03, 0x10));

        let first = decode_one(&bytes, 4, OpcodeVersion::Retail).unwrap();
        let second = decode_one(&bytes, 4, OpcodeVersion::Retail).unwrap();
        assert_eq!(first, second);

        // Bytes around the window have no influence.
        bytes[0] = 0x00;
        bytes[13] = 0x00;
        let third = decode_one(&bytes, 4, OpcodeVersion::Retail).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn short_window_fails() {
        let bytes = [0x02; 8];
        assert_eq!(
            decode_one(&bytes, 0, OpcodeVersion::Retail),
            Err(Error::UnexpectedEndOfImage { offset: 0 })
        );
    }
}
