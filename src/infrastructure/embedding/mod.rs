mod stub;
mod text;

pub use stub::StubEmbedder;
pub use text::TextEmbedder;
