use crate::bidi::BidiMap;
use crate::opcode::{OpcodeKind, OpcodeType, OpcodeVersion, UnmappedOpcode};
use lazy_static::lazy_static;

/// One version's byte-to-operation mapping.
pub struct OpcodeTable {
    version: OpcodeVersion,
    map: BidiMap<u8, OpcodeType>,
}

const RETAIL: &[(u8, OpcodeType)] = &[
    (0x02, OpcodeType::MemRead),
    (0x03, OpcodeType::MemWrite),
    (0x04, OpcodeType::PciWrite),
    (0x05, OpcodeType::PciRead),
    (0x06, OpcodeType::AndOr),
    (0x07, OpcodeType::Chain),
    (0x08, OpcodeType::Jne),
    (0x09, OpcodeType::Jmp),
    (0x10, OpcodeType::AndOrEbp),
    (0x11, OpcodeType::IoWrite),
    (0x12, OpcodeType::IoRead),
    (0xEE, OpcodeType::Exit),
];

const EARLY_DEBUG: &[(u8, OpcodeType)] = &[
    (0x9A, OpcodeType::MemRead),
    (0x5B, OpcodeType::MemWrite),
    (0xF9, OpcodeType::PciWrite),
    (0xF5, OpcodeType::PciRead),
    (0xED, OpcodeType::AndOr),
    (0x68, OpcodeType::Chain),
    (0x04, OpcodeType::Jne),
    (0x25, OpcodeType::Jmp),
    (0x6C, OpcodeType::AndOrEbp),
    (0x3C, OpcodeType::IoWrite),
    (0xC8, OpcodeType::IoRead),
    (0xBF, OpcodeType::Exit),
];

// AndOrEbp was never assigned a byte value in the LateDebug opcode set.
const LATE_DEBUG: &[(u8, OpcodeType)] = &[
    (0x09, OpcodeType::MemRead),
    (0x03, OpcodeType::MemWrite),
    (0x01, OpcodeType::PciWrite),
    (0x05, OpcodeType::PciRead),
    (0x06, OpcodeType::AndOr),
    (0xE1, OpcodeType::Chain),
    (0x04, OpcodeType::Jne),
    (0x07, OpcodeType::Jmp),
    (0x02, OpcodeType::IoWrite),
    (0x08, OpcodeType::IoRead),
    (0xEE, OpcodeType::Exit),
];

impl OpcodeTable {
    fn build(version: OpcodeVersion, pairs: &[(u8, OpcodeType)]) -> Self {
        let mut map = BidiMap::new();

        for &(value, opcode_type) in pairs {
            assert!(
                map.insert(value, opcode_type),
                "duplicate entry in {:?} opcode table: {:#04X} <-> {:?}",
                version,
                value,
                opcode_type
            );
        }

        Self { version, map }
    }

    /// Classifies a raw opcode byte. Bytes without an entry are reserved and
    /// treated as NOPs by the interpreter.
    pub fn kind_of(&self, value: u8) -> OpcodeKind {
        match self.map.get_forward(&value) {
            Some(&opcode_type) => OpcodeKind::Known(opcode_type),
            None => OpcodeKind::Reserved(value),
        }
    }

    /// Reverse lookup of the byte value for an operation.
    pub fn byte_of(&self, opcode_type: OpcodeType) -> Result<u8, UnmappedOpcode> {
        self.map
            .get_reverse(&opcode_type)
            .copied()
            .ok_or(UnmappedOpcode {
                version: self.version,
                opcode_type,
            })
    }

    pub fn version(&self) -> OpcodeVersion {
        self.version
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (u8, OpcodeType)> + '_ {
        self.map.iter().map(|(&value, &opcode_type)| (value, opcode_type))
    }
}

lazy_static! {
    static ref RETAIL_TABLE: OpcodeTable = OpcodeTable::build(OpcodeVersion::Retail, RETAIL);
    static ref EARLY_DEBUG_TABLE: OpcodeTable =
        OpcodeTable::build(OpcodeVersion::EarlyDebug, EARLY_DEBUG);
    static ref LATE_DEBUG_TABLE: OpcodeTable =
        OpcodeTable::build(OpcodeVersion::LateDebug, LATE_DEBUG);
}

/// Returns the static opcode table for a version.
pub fn opcode_table(version: OpcodeVersion) -> &'static OpcodeTable {
    match version {
        OpcodeVersion::Retail => &RETAIL_TABLE,
        OpcodeVersion::EarlyDebug => &EARLY_DEBUG_TABLE,
        OpcodeVersion::LateDebug => &LATE_DEBUG_TABLE,
    }
}
