pub mod request;
pub mod test_utils;
