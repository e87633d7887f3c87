pub mod bar_chart;
mod footer;
mod header;
mod help;
mod layout;
mod menu_view;
mod summary;
mod theme;

pub use footer::Footer;
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use menu_view::MenuView;
pub use summary::SummaryBar;
pub use theme::Theme;
