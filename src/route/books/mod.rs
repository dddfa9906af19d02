pub mod app;
pub mod create_book;
pub mod get_all_books;
pub mod replace_book;
