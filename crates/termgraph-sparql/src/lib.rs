//! # termgraph-sparql
//!
//! SPARQL protocol client for termgraph.
//!
//! Implements [`termgraph_core::GraphQueryClient`] over HTTP against
//! RDF4J/GraphDB-style servers: queries are POSTed to
//! `{url}/repositories/{id}` and results decoded from the SPARQL 1.1 JSON
//! results format.

pub mod client;
pub mod results;

pub use client::{SparqlClient, SparqlClientFactory, Timeouts};
pub use results::parse_select;
