//! End-to-end tests against the public API.

mod create_query_test;
mod round_trip_test;
mod safety_test;
