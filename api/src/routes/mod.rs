pub mod generate;
pub mod generate_pdf;
pub mod health;
pub mod quiz;
pub mod quiz_response;
