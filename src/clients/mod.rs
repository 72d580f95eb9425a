//! Client modules for external API interactions

pub mod http;
pub mod parameters;

pub use http::{FetchedResponse, HttpGateway, ReqwestGateway};
pub use parameters::{ParameterSource, SsmParameterSource};
