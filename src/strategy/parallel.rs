//! Parallel batch decoding
//!
//! Uses Rayon to decode many independent documents at once. Each input gets
//! its own `XmlDocument`, so no buffer or arena is ever shared between
//! threads while it is being written.

use std::path::Path;

use rayon::prelude::*;

use crate::config::ParseOptions;
use crate::dom::XmlDocument;
use crate::error::Result;

/// Decode every buffer in parallel, returning results in input order
pub fn parse_all(inputs: Vec<Vec<u8>>, options: &ParseOptions) -> Vec<Result<XmlDocument>> {
    tracing::debug!(documents = inputs.len(), "decoding batch");
    inputs
        .into_par_iter()
        .map(|input| XmlDocument::parse_with(input, options))
        .collect()
}

/// Load and decode every file in parallel, returning results in input order
pub fn open_all<P>(paths: &[P], options: &ParseOptions) -> Vec<Result<XmlDocument>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| XmlDocument::open_with(path, options))
        .collect()
}
