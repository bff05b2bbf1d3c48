pub mod generate_pdf_route;
