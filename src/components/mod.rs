pub mod controls;
pub mod force_graph;
pub mod legend;
pub mod node_details;
pub mod search_bar;
pub mod upload;
pub mod zoom_controls;
