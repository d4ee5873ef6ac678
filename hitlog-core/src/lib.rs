pub mod analysis;
pub mod cli;
pub mod conf;
pub mod enrichment;
pub mod ingest;
pub mod logging;
pub mod store;

#[cfg(test)]
mod test_helpers;
