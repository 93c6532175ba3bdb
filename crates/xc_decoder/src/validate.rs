use xc_instruction::{Opcode, OpcodeKind, OpcodeType, XCode, XCODE_SIZE};

/// Structural checks on an X-Code's operands, independent per instruction.
/// The diagnostics come back as human-readable messages that the renderer
/// emits as comment lines; they never stop a disassembly.
pub fn validate(xcode: &XCode) -> Vec<String> {
    let mut issues = Vec::new();
    let op1 = xcode.operand_one;
    let op2 = xcode.operand_two;

    match xcode.opcode.kind() {
        OpcodeKind::Known(OpcodeType::MemRead | OpcodeType::PciRead) => {
            if op2 != 0 {
                issues.push("Second operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(OpcodeType::IoRead) => {
            if op2 != 0 {
                issues.push("Second operand will be ignored.".to_string());
            }
            if op1 >> 16 != 0 {
                issues.push("Upper 16 bits of first operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(OpcodeType::IoWrite) => {
            if op1 >> 16 != 0 {
                issues.push("Upper 16 bits of first operand will be ignored.".to_string());
            }
            if op2 >> 8 != 0 {
                issues.push("Upper 24 bits of second operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(OpcodeType::Jmp) => {
            if op1 != 0 {
                issues.push("First operand will be ignored.".to_string());
            }
            if !jump_offset_aligned(op2) {
                issues.push(format!(
                    "Second operand should be a multiple of {}.",
                    XCODE_SIZE
                ));
            }
        }

        OpcodeKind::Known(OpcodeType::Jne) => {
            if !jump_offset_aligned(op2) {
                issues.push(format!(
                    "Second operand should be a multiple of {}.",
                    XCODE_SIZE
                ));
            }
        }

        OpcodeKind::Known(OpcodeType::Exit) => {
            if op1 != 0 {
                issues.push("First operand will be ignored.".to_string());
            }
            if op2 != 0 {
                issues.push("Second operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(
            OpcodeType::MemWrite | OpcodeType::PciWrite | OpcodeType::AndOr | OpcodeType::AndOrEbp,
        ) => {}

        OpcodeKind::Known(OpcodeType::Chain) => {
            if op1 >> 8 != 0 {
                issues.push("Upper 24 bits of first operand will be ignored.".to_string());
            }

            validate_chained(xcode, &mut issues);
        }

        OpcodeKind::Reserved(value) => {
            issues.push(format!("Unknown opcode 0x{:02X}.", value));
        }
    }

    issues
}

/// Re-applies the constraints of the sub-opcode embedded in a Chain's first
/// operand. One level only; a chained Chain is trusted beyond its own
/// operand width.
fn validate_chained(xcode: &XCode, issues: &mut Vec<String>) {
    let sub = Opcode::from_byte(xcode.operand_one as u8, xcode.opcode.version());
    let op2 = xcode.operand_two;

    match sub.kind() {
        OpcodeKind::Known(
            OpcodeType::MemWrite
            | OpcodeType::PciWrite
            | OpcodeType::AndOr
            | OpcodeType::AndOrEbp
            | OpcodeType::Jne,
        ) => {}

        OpcodeKind::Known(OpcodeType::Chain) => {
            if op2 >> 8 != 0 {
                issues.push("Upper 24 bits of second operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(OpcodeType::IoWrite) => {
            if op2 >> 16 != 0 {
                issues.push("Upper 16 bits of second operand will be ignored.".to_string());
            }
        }

        OpcodeKind::Known(OpcodeType::Jmp) => {
            issues.push("Second operand will be ignored.".to_string());
        }

        OpcodeKind::Known(
            OpcodeType::MemRead | OpcodeType::IoRead | OpcodeType::PciRead | OpcodeType::Exit,
        ) => {
            issues.push("The chain opcode should be called directly.".to_string());
        }

        OpcodeKind::Reserved(value) => {
            issues.push(format!("Unknown chain opcode 0x{:02X}.", value));
        }
    }
}

/// A jump operand must be a signed multiple of the record size; an all-ones
/// pattern would jump onto itself forever.
fn jump_offset_aligned(operand_two: u32) -> bool {
    let offset = operand_two as i32;
    offset != -1 && offset % XCODE_SIZE as i32 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use xc_instruction::OpcodeVersion;

    fn xcode(value: u8, operand_one: u32, operand_two: u32) -> XCode {
        XCode::new(
            Opcode::from_byte(value, OpcodeVersion::Retail),
            operand_one,
            operand_two,
            0x80,
        )
    }

    #[test]
    fn mem_read_ignores_second_operand() {
        assert!(validate(&xcode(0x02, 0x10, 0)).is_empty());
        assert_eq!(
            validate(&xcode(0x02, 0x10, 1)),
            vec!["Second operand will be ignored."]
        );
    }

    #[test]
    fn io_write_operand_widths() {
        assert!(validate(&xcode(0x11, 0x2E, 0x55)).is_empty());
        assert_eq!(
            validate(&xcode(0x11, 0x1_0000, 0x100)),
            vec![
                "Upper 16 bits of first operand will be ignored.",
                "Upper 24 bits of second operand will be ignored.",
            ]
        );
    }

    #[test]
    fn io_read_operand_widths() {
        assert!(validate(&xcode(0x12, 0x2E, 0)).is_empty());
        assert_eq!(
            validate(&xcode(0x12, 0x1_0000, 1)),
            vec![
                "Second operand will be ignored.",
                "Upper 16 bits of first operand will be ignored.",
            ]
        );
    }

    #[test]
    fn jmp_operand_alignment() {
        assert!(validate(&xcode(0x09, 0, 18)).is_empty());

        // Backward jumps are fine as long as they stay record-aligned.
        assert!(validate(&xcode(0x09, 0, 0xFFFF_FFEE)).is_empty());

        assert_eq!(
            validate(&xcode(0x09, 0, 5)),
            vec!["Second operand should be a multiple of 9."]
        );
        assert_eq!(
            validate(&xcode(0x09, 0, 0xFFFF_FFFF)),
            vec!["Second operand should be a multiple of 9."]
        );
        assert_eq!(
            validate(&xcode(0x09, 1, 9)),
            vec!["First operand will be ignored."]
        );
    }

    #[test]
    fn jne_operand_alignment() {
        assert!(validate(&xcode(0x08, 0x10, 9)).is_empty());
        assert_eq!(
            validate(&xcode(0x08, 0x10, 4)),
            vec!["Second operand should be a multiple of 9."]
        );
    }

    #[test]
    fn exit_operands_must_be_zero() {
        assert!(validate(&xcode(0xEE, 0, 0)).is_empty());
        assert_eq!(
            validate(&xcode(0xEE, 1, 1)),
            vec![
                "First operand will be ignored.",
                "Second operand will be ignored.",
            ]
        );
    }

    #[test]
    fn write_and_andor_opcodes_have_no_constraints() {
        for value in [0x03, 0x04, 0x06, 0x10] {
            assert!(validate(&xcode(value, 0xFFFF_FFFF, 0xFFFF_FFFF)).is_empty());
        }
    }

    #[test]
    fn reserved_opcode_is_flagged() {
        assert_eq!(validate(&xcode(0x42, 0, 0)), vec!["Unknown opcode 0x42."]);
    }

    #[test]
    fn chain_operand_width() {
        // 0x03 chains a MemWrite, which carries no extra constraint.
        assert!(validate(&xcode(0x07, 0x03, 0xFFFF_FFFF)).is_empty());
        assert_eq!(
            validate(&xcode(0x07, 0x1_0003, 0)),
            vec!["Upper 24 bits of first operand will be ignored."]
        );
    }

    #[test]
    fn chained_jmp_ignores_second_operand() {
        // 0x09 is Jmp in the Retail set.
        assert_eq!(
            validate(&xcode(0x07, 0x09, 0x10)),
            vec!["Second operand will be ignored."]
        );
    }

    #[test]
    fn chained_reads_should_be_called_directly() {
        for sub in [0x02, 0x05, 0x12, 0xEE] {
            assert_eq!(
                validate(&xcode(0x07, sub as u32, 0)),
                vec!["The chain opcode should be called directly."]
            );
        }
    }

    #[test]
    fn chained_chain_checks_second_operand_width_only() {
        assert!(validate(&xcode(0x07, 0x07, 0xFF)).is_empty());
        assert_eq!(
            validate(&xcode(0x07, 0x07, 0x100)),
            vec!["Upper 24 bits of second operand will be ignored."]
        );
    }

    #[test]
    fn chained_io_write_checks_second_operand_width() {
        assert!(validate(&xcode(0x07, 0x11, 0xFFFF)).is_empty());
        assert_eq!(
            validate(&xcode(0x07, 0x11, 0x1_0000)),
            vec!["Upper 16 bits of second operand will be ignored."]
        );
    }

    #[test]
    fn chained_unknown_sub_opcode() {
        assert_eq!(
            validate(&xcode(0x07, 0x42, 0)),
            vec!["Unknown chain opcode 0x42."]
        );
    }

    #[test]
    fn chain_sub_opcode_uses_the_active_version() {
        // 0x68 is Chain in the EarlyDebug set; 0x5B chains a MemWrite there.
        let chain = XCode::new(
            Opcode::from_byte(0x68, OpcodeVersion::EarlyDebug),
            0x5B,
            0,
            0x80,
        );
        assert!(validate(&chain).is_empty());
    }
}
