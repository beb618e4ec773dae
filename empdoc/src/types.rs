use serde::{Deserialize, Serialize};

/// A parsed markdown page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Ordered sequence of blocks.
    pub blocks: Vec<Block>,
    /// Source text after CRLF normalisation.
    pub source: String,
}

/// 1-based, inclusive line range of a block in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn line(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
        }
    }
}

/// A block-level element.
///
/// Text fields hold the raw (unescaped) source text. Escaping and inline
/// rendering happen when the block is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        span: Span,
    },
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        content: String,
        /// False when the fence was still open at end of input. An unclosed
        /// fence renders without its language tag.
        closed: bool,
        span: Span,
    },
    List {
        ordered: bool,
        items: Vec<String>,
        span: Span,
    },
    Blockquote {
        text: String,
        span: Span,
    },
    Paragraph {
        text: String,
        span: Span,
    },
}

impl Block {
    pub fn span(&self) -> Span {
        match self {
            Block::Heading { span, .. }
            | Block::Code { span, .. }
            | Block::List { span, .. }
            | Block::Blockquote { span, .. }
            | Block::Paragraph { span, .. } => *span,
        }
    }
}

/// One detected syntax construct plus the doc page that explains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub id: String,
    pub label: String,
    pub doc: String,
}

/// Surface counts gathered from an `.em` source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub line_count: usize,
    pub function_count: usize,
    pub import_count: usize,
    pub match_count: usize,
    pub defer_count: usize,
}

/// Heuristic explanation of one `.em` source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub file_path: Option<String>,
    pub is_fail: bool,
    pub statistics: Statistics,
    pub features: Vec<FeatureDescriptor>,
    pub keywords: Vec<String>,
    pub passes: Vec<String>,
    pub hints: Vec<String>,
}

impl Prediction {
    /// True if a feature with this id was detected.
    pub fn has_feature(&self, id: &str) -> bool {
        self.features.iter().any(|f| f.id == id)
    }
}
