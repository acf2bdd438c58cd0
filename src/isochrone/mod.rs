pub mod edge;
pub mod network;
pub mod solver;

pub(crate) mod dijkstra;
pub(crate) mod segment;


pub use edge::{Edge, Fragment, ISOLATED_EDGE_ID};
pub use network::Network;
pub use solver::{compute_isochrone_fragments, Isochrone};
