//! UI Components for Registrar.

mod error_banner;
mod nav_header;
mod sql_panel;
mod text_field;

pub use error_banner::ErrorBannerView;
pub use nav_header::NavHeader;
pub use sql_panel::{OperationBadge, SqlDebuggerPanel};
pub use text_field::TextField;
