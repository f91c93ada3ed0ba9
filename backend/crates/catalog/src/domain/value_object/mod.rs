pub mod book_id;
pub mod book_status;

pub use book_id::BookId;
pub use book_status::BookStatus;
