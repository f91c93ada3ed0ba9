pub mod approve_book;
pub mod config;
pub mod delete_book;
pub mod list_books;
pub mod submit_book;
pub mod update_book_status;

pub use approve_book::{ApproveBookInput, ApproveBookUseCase};
pub use delete_book::{DeleteBookInput, DeleteBookUseCase};
pub use list_books::ListBooksUseCase;
pub use submit_book::{SubmitBookInput, SubmitBookUseCase};
pub use update_book_status::{UpdateBookStatusInput, UpdateBookStatusUseCase};
