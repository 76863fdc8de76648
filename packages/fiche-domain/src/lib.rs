pub mod history;
pub mod id;
pub mod normalize;
pub mod results;
pub mod session;
pub mod sidebar;

pub use history::{ArticleRef, History, QueryNode};
pub use id::NodeId;
pub use normalize::{MalformedPayload, NormalizeOptions};
pub use results::{Enrichment, ResultsState, SearchPhase, SearchResult};
pub use session::Session;
pub use sidebar::{Sidebar, TreeRow, tree_rows};
