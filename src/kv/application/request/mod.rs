pub mod key_request;
