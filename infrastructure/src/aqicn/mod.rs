//! AQICN page-scraping source.

mod source;

pub use source::AqicnSource;
