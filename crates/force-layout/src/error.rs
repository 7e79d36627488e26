#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("link {link} references node {node}, but only {node_count} nodes exist")]
    LinkOutOfBounds {
        link: usize,
        node: usize,
        node_count: usize,
    },
    #[error("link {link} has non-positive weight {weight}")]
    InvalidWeight { link: usize, weight: f32 },
    #[error("node {node} has non-positive radius {radius}")]
    InvalidRadius { node: usize, radius: f32 },
    #[error("no node with index {node} (graph has {node_count} nodes)")]
    UnknownNode { node: usize, node_count: usize },
}
