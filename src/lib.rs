pub mod analyzers;
pub mod dataset;
pub mod fetch;
pub mod output;
pub mod parser;
