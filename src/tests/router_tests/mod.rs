mod api_tests;
mod auth_tests;
mod page_tests;
