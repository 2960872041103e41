//! HTTP route handlers for the prediction server.

pub mod predict;
