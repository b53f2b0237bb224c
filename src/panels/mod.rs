mod central_panel;
mod tools_panel;

pub use central_panel::{LiveView, central_panel};
pub use tools_panel::{SidebarTab, tools_panel};
