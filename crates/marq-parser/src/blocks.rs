//! Block splitting.

use std::collections::VecDeque;

/// Queue of blocks awaiting dispatch. The front is the next block.
///
/// Handlers pop consumed blocks from the front and may push derived blocks
/// back onto the front for re-dispatch.
pub type Blocks = VecDeque<String>;

/// Split source text into blocks: maximal runs of non-blank lines.
///
/// Lines containing only whitespace separate blocks and are discarded.
/// Trailing whitespace on each line is stripped.
#[must_use]
pub fn split_blocks(source: &str) -> Blocks {
    let mut blocks = Blocks::new();
    let mut current = String::new();

    for line in source.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push_back(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line.trim_end());
        }
    }
    if !current.is_empty() {
        blocks.push_back(current);
    }

    blocks
}
