mod middleware;
mod public;

pub use middleware::RequestContext;
pub use public::{App, HttpState, build_app};
