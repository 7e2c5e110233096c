pub mod binding;
pub mod error;
pub mod gesture;
pub mod launch;
pub mod menu;
pub mod module;
pub mod scroll;
pub mod source;
pub mod template;
pub mod value;
pub mod widget;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use binding::InputBindingTable;
pub use error::{BarError, Result};
pub use gesture::Gesture;
pub use launch::Launcher;
pub use menu::{ActionMenu, Menu, MenuSelection};
pub use module::Module;
pub use scroll::Scroller;
pub use source::PropertySource;
pub use template::Template;
pub use value::Value;
pub use widget::{DisplayState, StatusWidget, UNKNOWN_TEXT};
