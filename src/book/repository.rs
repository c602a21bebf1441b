use super::{Book, BookFields};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("A book with that title already exists: {0}")]
    DuplicateTitle(String),
    #[error("No book with id {0}")]
    NotFound(i64),
    #[error("No book ids left to assign")]
    IdsExhausted,
}

/// Hands out book ids in increasing order.
///
/// `next` is `None` once `i64::MAX` has been handed out.
#[derive(Debug)]
pub struct BookIdSequence {
    next: Option<i64>,
}

impl BookIdSequence {
    pub fn starting_at(next: i64) -> Self {
        Self { next: Some(next) }
    }

    /// A sequence that follows `last` and never goes below 1.
    pub fn after(last: i64) -> Self {
        Self {
            next: last.checked_add(1).map(|next| next.max(1)),
        }
    }

    pub fn next_id(&mut self) -> Result<i64, RepositoryError> {
        let id = self.next.ok_or(RepositoryError::IdsExhausted)?;
        self.next = id.checked_add(1);

        Ok(id)
    }
}

impl Default for BookIdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// In-memory store owning every [`Book`].
#[derive(Debug, Default)]
pub struct BookRepository {
    books: Vec<Book>,
    ids: BookIdSequence,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `books`. New ids start above the highest seeded id.
    pub fn with_books(books: Vec<Book>) -> Self {
        let ids = books
            .iter()
            .map(|book| book.book_id)
            .max()
            .map_or_else(BookIdSequence::default, BookIdSequence::after);

        Self { books, ids }
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn get_by_id(&self, book_id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.book_id == book_id)
    }

    pub fn get_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title == title)
    }

    pub fn insert(&mut self, fields: BookFields) -> Result<Book, RepositoryError> {
        if let Some(existing) = self.get_by_title(&fields.title) {
            return Err(RepositoryError::DuplicateTitle(existing.title.clone()));
        }

        let book = Book::new(self.ids.next_id()?, fields);
        self.books.push(book.clone());

        Ok(book)
    }

    /// Replaces title, author and description of the book with `book_id`.
    pub fn update(&mut self, book_id: i64, fields: BookFields) -> Result<Book, RepositoryError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.book_id == book_id)
            .ok_or(RepositoryError::NotFound(book_id))?;

        *book = Book::new(book_id, fields);

        Ok(book.clone())
    }

    pub fn delete(&mut self, book_id: i64) -> Result<Book, RepositoryError> {
        let index = self
            .books
            .iter()
            .position(|book| book.book_id == book_id)
            .ok_or(RepositoryError::NotFound(book_id))?;

        Ok(self.books.remove(index))
    }

    /// One `<id> <title>` line per book.
    pub fn summary(&self) -> String {
        self.books
            .iter()
            .map(|book| format!("{} {}", book.book_id, book.title))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
