/// API error types and handling
pub mod errors;
/// HTTP handlers for authors and books
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;

#[cfg(test)]
mod tests;
