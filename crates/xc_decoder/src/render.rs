use crate::comments::CommentSet;
use crate::disasm::Disassembly;
use crate::validate::validate;
use xc_instruction::XCodeFlags;

/// Column gap between the longest instruction line and the first comment.
const COMMENT_GUTTER: usize = 8;

/// Renders the final text: a label line for each jump target, one comment
/// line per validation diagnostic, then the instruction itself with any
/// matching annotations column-aligned at the end.
pub fn render(disassembly: &Disassembly, comments: &CommentSet) -> String {
    let lines: Vec<String> = disassembly.xcodes.iter().map(|x| x.to_string()).collect();
    let comment_column = lines.iter().map(String::len).max().unwrap_or(0) + COMMENT_GUTTER;

    let mut output = String::new();
    for (xcode, line) in disassembly.xcodes.iter().zip(&lines) {
        if xcode.flags.contains(XCodeFlags::SHOW_LOCATION_LABEL) {
            output.push_str(&format!("loc_{:X}:\n", xcode.offset));
        }

        for issue in validate(xcode) {
            output.push_str(&format!("; !!! {} !!!\n", issue));
        }

        output.push_str(line);

        let matched = comments.matches(line);
        if !matched.is_empty() {
            for _ in line.len()..comment_column {
                output.push(' ');
            }
            for comment in matched {
                output.push_str(&format!(" ; {}", comment));
            }
        }

        output.push('\n');
    }

    output
}
