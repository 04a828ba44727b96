//! Chat-specific UI components.
//!
//! Every component reads the [`WidgetContext`](crate::ui::controller::WidgetContext)
//! provided by the widget root, so none of them take state as props.

mod header;
mod input_area;
mod message_list;
mod settings_panel;
mod shell;
mod stats_modal;

pub use header::{ChatHeader, status_text};
pub use input_area::ChatInputArea;
pub use message_list::ChatMessageList;
pub use settings_panel::SettingsPanel;
pub use shell::ChatShell;
pub use stats_modal::StatsModal;
