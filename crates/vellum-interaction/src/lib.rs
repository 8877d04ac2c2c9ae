//! Interaction layer for Vellum: talks to the remote analysis service.

pub mod http_dispatcher;

pub use http_dispatcher::HttpSubmissionDispatcher;
