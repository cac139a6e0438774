pub mod key_value_client;
