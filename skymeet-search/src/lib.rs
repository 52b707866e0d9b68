pub mod aggregate;
pub mod fanout;
pub mod filter;
pub mod normalize;
pub mod pipeline;

pub use fanout::MultiOriginQuery;
pub use pipeline::{SearchOutcome, SearchPipeline, SearchResults};
