//! Article bodies: plain text or structured blocks

/// A body as delivered by the CMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Paragraphs separated by blank lines
    PlainText(String),
    /// Rich-text block nodes
    RichBlocks(Vec<BlockNode>),
}

impl Default for Body {
    fn default() -> Self {
        Body::RichBlocks(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: String,
    pub children: Vec<InlineSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
}

impl BlockNode {
    pub fn paragraph(spans: &[&str]) -> Self {
        Self {
            kind: "paragraph".to_string(),
            children: spans
                .iter()
                .map(|s| InlineSpan {
                    text: s.to_string(),
                })
                .collect(),
        }
    }

    fn is_paragraph(&self) -> bool {
        self.kind == "paragraph"
    }

    fn text(&self) -> String {
        self.children.iter().map(|c| c.text.as_str()).collect()
    }
}

impl Body {
    /// The paragraphs to render, in order
    ///
    /// Plain text splits on blank lines; blocks keep only `paragraph` nodes.
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            Body::PlainText(text) => text
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            Body::RichBlocks(blocks) => blocks
                .iter()
                .filter(|b| b.is_paragraph())
                .map(BlockNode::text)
                .collect(),
        }
    }

    /// All paragraph text joined with newlines (search index, meta tags)
    pub fn plain_text(&self) -> String {
        self.paragraphs().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs().is_empty()
    }
}
