//! UI components: the graph explorer and the history tree view.

pub mod graph;
pub mod prov_vis;
