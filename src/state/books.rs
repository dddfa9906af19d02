use tokio::sync::RwLock;

use crate::types::book::Book;

/// The in-memory book collection.
///
/// Every operation takes the lock once, so a single operation is never observed half-done.
/// Nothing orders operations coming from different clients.
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    /// Creates a store holding the seed books.
    pub fn seeded() -> Self {
        Self {
            books: RwLock::new(Book::seed()),
        }
    }

    /// Resets the collection to the seed books.
    #[tracing::instrument(skip_all)]
    pub async fn reset(&self) {
        *self.books.write().await = Book::seed();

        tracing::debug!("Books reset");
    }

    /// Resets the collection to the seed books and returns them.
    #[tracing::instrument(skip_all)]
    pub async fn reset_and_list(&self) -> Vec<Book> {
        let mut books = self.books.write().await;
        *books = Book::seed();

        books.clone()
    }

    /// Appends a book. Ids are not checked for collisions.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Removes every book sharing the id of `book`, then appends `book`.
    #[tracing::instrument(skip(self))]
    pub async fn replace(&self, book: Book) {
        let mut books = self.books.write().await;

        let before = books.len();
        books.retain(|existing| existing.id != book.id);
        tracing::debug!(removed = before - books.len(), "Replacing book");

        books.push(book);
    }

    /// Returns a copy of the current collection without reseeding.
    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }
}
