mod component;
mod export;
mod forces;
mod render;
pub mod scale;
mod state;

pub use component::ForceGraphCanvas;
pub use export::ExportFormat;
