pub mod client;
pub mod config;
pub mod extract;
pub mod testing;
pub mod transport;

pub use client::{Credentials, Endpoints, NnmClub, NnmClubError, SearchResults};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, CredentialsConfig, ForumConfig, SanitizedConfig, SearchConfig,
};
pub use extract::{ParsingError, SearchRecord};
pub use transport::{HttpTransport, Transport, TransportError};
