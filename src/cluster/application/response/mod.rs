pub mod status_response;
