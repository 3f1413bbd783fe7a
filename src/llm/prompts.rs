/// Instruction used to turn a transcript into a first draft.
pub const DRAFT_INSTRUCTION: &str = "Draft an informative, well-structured article with three to five \
paragraphs based on the following transcript:";

/// Instruction used to polish a draft without changing its structure.
pub const IMPROVE_INSTRUCTION: &str = "Improve the following article for grammar, clarity, and \
readability without shortening it. Keep the original title and all section headings exactly as \
they appear. Return only the improved article text, with no introductions, explanations, or \
additional commentary:";

/// Combine an instruction with the text it applies to.
///
/// The transcript follows the draft instruction on the same line; anything
/// else starts after a blank line.
pub fn build_prompt(instruction: &str, content: &str) -> String {
    let separator = if instruction == DRAFT_INSTRUCTION {
        " "
    } else {
        "\n\n"
    };
    format!("{}{}{}", instruction.trim_end(), separator, content.trim())
}
