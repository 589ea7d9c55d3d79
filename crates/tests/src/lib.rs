pub mod fixtures;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod list_view_tests;
