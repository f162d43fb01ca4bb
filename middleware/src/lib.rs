//! Middleware and handlers for the ingestion chain: chat filter, human log, structured persistence,
//! and the `/hello` greeting.

mod greeting;
mod logging_filter;
mod persistence_middleware;

#[cfg(test)]
mod test;

pub use greeting::{GreetingHandler, GREETING};
pub use logging_filter::{ChatFilterMiddleware, HumanLogMiddleware};
pub use persistence_middleware::PersistenceMiddleware;
