/// Unit tests for the public domain API
mod streak_tests;
mod transfer_tests;
