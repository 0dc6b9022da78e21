//! Fixed-size text chunking

/// Splits text into consecutive slices of at most `chunk_size` characters
///
/// Slicing counts Unicode scalar values, never bytes, so multi-byte text is
/// never cut inside a character.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    limit: Option<usize>,
}

/// Chunks selected for analysis, plus how many the cap left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Chunks to analyse, in text order
    pub chunks: Vec<String>,

    /// Number of chunks the whole text would produce
    pub total: usize,
}

impl ChunkPlan {
    /// Chunks dropped by the cap
    pub fn skipped(&self) -> usize {
        self.total - self.chunks.len()
    }

    /// Characters covered by the selected chunks
    pub fn analysed_chars(&self) -> usize {
        self.chunks.iter().map(|c| c.chars().count()).sum()
    }
}

impl TextChunker {
    /// Create a new text chunker without a chunk cap
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            limit: None,
        }
    }

    /// Keep only the first `limit` chunks (`None` keeps all)
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk the given text, ignoring the cap
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (offset, _) in text.char_indices() {
            if count == self.chunk_size {
                chunks.push(text[start..offset].to_string());
                start = offset;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(text[start..].to_string());
        }

        chunks
    }

    /// Chunk the given text and apply the cap
    pub fn plan(&self, text: &str) -> ChunkPlan {
        let mut chunks = self.chunk(text);
        let total = chunks.len();
        if let Some(limit) = self.limit {
            chunks.truncate(limit);
        }
        ChunkPlan { chunks, total }
    }
}
