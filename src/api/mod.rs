//! JSON REST surface over the scraper
//!
//! Every route answers with the envelope from [`envelope`]: a success body
//! carrying `data` and `responseTime`, or an error body carrying `error.code`.

pub mod envelope;
pub mod handlers;

pub use handlers::{configure, route_not_found};
