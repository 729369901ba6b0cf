//! HTTP dashboard and inference service.
//!
//! The service loads the corpus and the trained pipeline once at startup into
//! an explicit [`AppContext`], shared read-only with every request handler;
//! there are no ambient globals and no write path while serving.

pub mod context;
pub mod dashboard;
pub mod routes;

pub use context::AppContext;
pub use dashboard::{ChartSpec, DashboardResponse, build_dashboard};
pub use routes::{router, serve};
