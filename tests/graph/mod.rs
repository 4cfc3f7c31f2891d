mod network;

pub use network::{EdgeId, JunctionId, NETWORK_GRAPH, NetworkGraph};
