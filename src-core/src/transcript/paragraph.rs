use super::caption::{Paragraph, Sentence};

pub const DEFAULT_PARAGRAPH_SIZE: usize = 3;

/// Groups consecutive sentences into paragraphs of `size` (the last one holds
/// the remainder). A `size` of zero is treated as one.
pub fn group_paragraphs(sentences: &[Sentence], size: usize) -> Vec<Paragraph> {
    sentences
        .chunks(size.max(1))
        .filter_map(|chunk| Paragraph::from_sentences(chunk.to_vec()))
        .collect()
}
