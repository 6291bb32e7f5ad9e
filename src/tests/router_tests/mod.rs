mod activity_tests;
mod homepage_tests;
