mod error;
mod provider;
mod value;

pub use error::CredentialsError;
pub use provider::{CredentialsProvider, EnvCredentialsProvider, StaticCredentialsProvider};
pub use value::{Credentials, DEFAULT_API_URL};
