mod collect;
mod render;
mod scan;

pub use collect::{collect, CollectArgs};
pub use render::{render, RenderArgs};
pub use scan::{scan, ScanArgs};
