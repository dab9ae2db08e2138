//! Cleaning pipeline for the LIVE-ADDIS Facebook scrape.
//!
//! Turns the raw scraper export (a JSON array of schema-less post
//! mappings) into the `clean_data.json` dataset the static site renders,
//! downloading referenced CDN images into content-addressed local storage
//! along the way.
//!
//! The run is one linear pass: load → per-post normalize/filter → per-item
//! select + fetch → single final write. See [`pipeline::Pipeline`].

pub mod config;
pub mod facebook;
pub mod images;
pub mod pipeline;
