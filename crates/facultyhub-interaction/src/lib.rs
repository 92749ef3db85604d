//! HTTP boundary of the FacultyHub client.
//!
//! - [`gateway`]: request/response values and the [`HttpGateway`] seam
//! - [`reqwest_gateway`]: the real transport
//! - [`clients`]: one resource client per backend resource
//! - [`testing`]: a scripted, request-recording gateway for tests

pub mod clients;
pub mod gateway;
pub mod reqwest_gateway;
pub mod testing;

pub use clients::ApiClients;
pub use gateway::{ApiRequest, ApiResponse, FormPart, HttpGateway, Method, RequestBody};
pub use reqwest_gateway::ReqwestGateway;
