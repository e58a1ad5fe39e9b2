mod auth_port;
mod http_port;
mod navigation_port;
mod token_storage_port;

pub use auth_port::{AuthPort, RenewedTokens};
pub use http_port::{
    ApiRequest, ApiResponse, HttpTransport, Method, MultipartForm, MultipartPart, RequestBody,
};
pub use navigation_port::NavigationPort;
pub use token_storage_port::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStoragePort};
