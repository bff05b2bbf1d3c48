pub mod get_quiz_route;
