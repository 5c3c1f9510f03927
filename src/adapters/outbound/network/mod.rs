pub mod snyk_client;

pub use snyk_client::SnykAibomClient;
