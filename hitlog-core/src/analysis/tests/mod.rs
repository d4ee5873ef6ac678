mod aggregator_tests;
mod types_tests;
