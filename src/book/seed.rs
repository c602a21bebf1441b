use super::{repository::BookRepository, Book};

/// Books available in development runs.
pub fn demo_books() -> Vec<Book> {
    vec![
        Book {
            book_id: 1,
            title: "The Hobbit".to_string(),
            author: "J. R. R. Tolkien".to_string(),
            description: "Someone finds a nice piece of jewellery while on holiday.".to_string(),
        },
        Book {
            book_id: 2,
            title: "The Shop Before Life".to_string(),
            author: "Neil Hughes".to_string(),
            description: "Before being born, each person must visit the magical Shop Before Life, where they choose what kind of person they will become down on Earth...".to_string(),
        },
    ]
}

pub fn demo_repository() -> BookRepository {
    let books = demo_books();
    tracing::debug!(count = books.len(), "Seeding demo books");

    BookRepository::with_books(books)
}
