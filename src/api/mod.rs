pub mod client;
pub mod models;
pub mod pagination;
pub mod resources;

pub use client::{BugsnagClient, ClientConfig, QueryParams};
pub use pagination::{PageResult, parse_link_header};
pub use resources::{ListErrorsOptions, Listing};
