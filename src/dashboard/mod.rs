pub mod handler;
pub mod page;
pub mod server;

pub use handler::{Dashboard, DashboardResponse};
pub use page::render_html;
pub use server::serve_lines;
