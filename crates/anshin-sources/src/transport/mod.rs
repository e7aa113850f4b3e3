pub mod http_client;
pub mod html;

pub use http_client::{HttpClient, HttpClientConfig};
