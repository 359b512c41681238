pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dls;
pub mod iddfs;
pub mod ucs;

pub use bfs::Bfs;
pub use bidirectional::BidirectionalSearch;
pub use common::{SearchResult, SearchStatus, SearchStrategy};
pub use dfs::Dfs;
pub use dls::Dls;
pub use iddfs::Iddfs;
pub use ucs::Ucs;
