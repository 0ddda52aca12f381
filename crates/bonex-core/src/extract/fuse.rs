//! Fusion of per-image recognized text into one receipt blob.

/// Join per-image text blocks into a single receipt text.
///
/// Blocks are trimmed, blocks left empty by trimming are dropped, and
/// the survivors are joined with a newline in their original order. The
/// result is empty when every block is empty; interpreting that is the
/// pipeline's job, not a failure here.
pub fn fuse_text_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .map(|block| block.as_ref().trim())
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fuse_joins_blocks_in_order() {
        let blocks = ["first page", "second page", "third page"];
        assert_eq!(
            fuse_text_blocks(&blocks),
            "first page\nsecond page\nthird page"
        );
    }

    #[test]
    fn test_fuse_drops_whitespace_only_blocks() {
        let blocks = ["  ", "A", ""];
        assert_eq!(fuse_text_blocks(&blocks), "A");
    }

    #[test]
    fn test_fuse_single_block_is_trim() {
        let blocks = ["  Billa\nМляко 2.50  "];
        assert_eq!(fuse_text_blocks(&blocks), "Billa\nМляко 2.50");
    }

    #[test]
    fn test_fuse_all_empty_gives_empty_string() {
        let blocks = ["", "   ", "\n\t"];
        assert_eq!(fuse_text_blocks(&blocks), "");
    }
}
