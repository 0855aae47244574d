mod interact;
mod layout;
mod select;

pub use interact::{EdgeEmphasis, Hover, build_highlight_state, edge_at, edge_detail, node_at};
pub use layout::{LayoutConfig, layout};
pub use select::{DEFAULT_MAX_EDGES, SelectedSubgraph, select_subgraph};
