pub mod client;
pub mod types;

pub use client::{HttpQueryClient, QueryClient};
pub use types::{ErrorResponse, QueryRequest, QueryResponse};
