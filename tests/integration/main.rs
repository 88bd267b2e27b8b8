//! End-to-end tests driving the full router.

mod events_test;
mod health_test;
mod helpers;
mod links_test;
