use crate::decode::decode_one;
use crate::errors::{Error, Result};
use xc_instruction::{OpcodeKind, OpcodeType, OpcodeVersion, XCode, XCodeFlags, XCODE_SIZE};

/// Byte offset of the first X-Code record within the image.
pub const XCODE_BASE: u32 = 0x80;

/// Upper bound on the number of records decoded in one pass.
const MAX_XCODES: usize = 2000;

/// Records decoded per version while auto-detecting the opcode set.
const SAMPLE_SIZE: usize = 100;

/// Records skipped before the detection sample starts.
const SAMPLE_SKIP: u32 = 2;

const IMAGE_MAGIC_QWORD: u64 = 0xFF000008FF000009;
const IMAGE_MAGIC_DWORD: u32 = 0x2B16D065;

const IMAGE_LENGTHS: [usize; 3] = [0x40000, 0x80000, 0x100000];

/// A fully decoded and label-resolved instruction stream, along with the
/// opcode version that produced it.
#[derive(Debug)]
pub struct Disassembly {
    pub version: OpcodeVersion,
    pub xcodes: Vec<XCode>,
}

/// Disassembles a boot-ROM image in three passes: version detection,
/// sequential decode and jump resolution. The image length and magic header
/// are checked before any decoding starts.
pub fn disassemble(image: &[u8]) -> Result<Disassembly> {
    check_image(image)?;

    let version = detect_version(image)?;
    let mut xcodes = decode_stream(image, XCODE_BASE, version, MAX_XCODES)?;
    resolve_jump_labels(&mut xcodes);

    Ok(Disassembly { version, xcodes })
}

fn check_image(image: &[u8]) -> Result<()> {
    if !IMAGE_LENGTHS.contains(&image.len()) {
        return Err(Error::InvalidImageLength(image.len()));
    }

    let mut qword = [0_u8; 8];
    qword.copy_from_slice(&image[..8]);
    let mut dword = [0_u8; 4];
    dword.copy_from_slice(&image[8..12]);

    if u64::from_le_bytes(qword) != IMAGE_MAGIC_QWORD
        || u32::from_le_bytes(dword) != IMAGE_MAGIC_DWORD
    {
        return Err(Error::InvalidImageHeader);
    }

    Ok(())
}

/// Decodes a small sample under each version and picks the one that yields
/// the most known opcodes. The sample skips the first two records, which
/// decode plausibly under more than one opcode set on real images.
pub fn detect_version(image: &[u8]) -> Result<OpcodeVersion> {
    let sample_start = XCODE_BASE + SAMPLE_SKIP * XCODE_SIZE;

    let mut scores = Vec::with_capacity(OpcodeVersion::ALL.len());
    for version in OpcodeVersion::ALL {
        let sample = decode_stream(image, sample_start, version, SAMPLE_SIZE)?;
        let valid = sample.iter().filter(|x| x.opcode.is_valid()).count();
        scores.push((version, valid));
    }

    // The stable sort keeps the table order for equal scores, so ties
    // resolve to Retail, then EarlyDebug, then LateDebug.
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(scores[0].0)
}

/// Decodes records sequentially from `offset` until the first Exit opcode is
/// seen or `max` records have been produced.
///
/// Known limitation, preserved for output compatibility: decoding stops at
/// the *first* Exit in the stream, so anything behind a spurious or early
/// Exit is never decoded.
fn decode_stream(
    image: &[u8],
    offset: u32,
    version: OpcodeVersion,
    max: usize,
) -> Result<Vec<XCode>> {
    let mut xcodes = Vec::new();
    let mut offset = offset;

    loop {
        let xcode = decode_one(image, offset, version)?;
        offset += XCODE_SIZE;

        let is_exit = xcode.opcode.kind() == OpcodeKind::Known(OpcodeType::Exit);
        xcodes.push(xcode);

        if is_exit || xcodes.len() >= max {
            break;
        }
    }

    Ok(xcodes)
}

/// Turns Jmp/Jne operands into location labels. A jump whose target is not
/// record-aligned or lands outside the decoded stream gets HIDE_JUMP_LABEL
/// and renders its raw operand instead.
fn resolve_jump_labels(xcodes: &mut [XCode]) {
    for i in 0..xcodes.len() {
        match xcodes[i].opcode.kind() {
            OpcodeKind::Known(OpcodeType::Jmp | OpcodeType::Jne) => {}
            _ => continue,
        }

        // The jump lands relative to the end of the current record.
        let jump_offset = XCODE_SIZE as i64 + xcodes[i].operand_two as i32 as i64;
        if jump_offset % XCODE_SIZE as i64 != 0 {
            xcodes[i].flags |= XCodeFlags::HIDE_JUMP_LABEL;
            continue;
        }

        let jump_index = i as i64 + jump_offset / XCODE_SIZE as i64;
        if jump_index < 0 || jump_index >= xcodes.len() as i64 {
            xcodes[i].flags |= XCodeFlags::HIDE_JUMP_LABEL;
            continue;
        }

        xcodes[jump_index as usize].flags |= XCodeFlags::SHOW_LOCATION_LABEL;
    }
}
