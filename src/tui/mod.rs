//! Terminal user interface: session state, frame composition, and the
//! key-driven navigation loop.

pub mod content;
pub mod input;
pub mod render;
pub mod session;
pub mod sink;
pub mod theme;
pub mod window;

pub use input::{KeySource, TerminalKeys};
pub use session::{ListKind, Session, View};
pub use sink::{FrameModel, FrameSink, SideList, TerminalSink};
pub use theme::Theme;
pub use window::Window;
