mod crawler;
mod extract;

pub use crawler::{parse_toc_links, HttpPageSource};
pub use extract::extract_page;
