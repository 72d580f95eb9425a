//! Shared API Gateway plumbing for the tracer and store Lambdas

pub mod helpers;
pub mod parsing;
