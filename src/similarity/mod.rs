mod load;
mod model;
mod parse;

pub use load::load_similarity_data;
pub use model::{AgentProfile, SimilarityData, SimilarityEdge};
