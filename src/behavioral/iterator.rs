//! Pattern: Iterator
//! Example: a book collection whose traversal lives in a separate cursor object.
//! Several cursors can walk the same collection independently.

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
        }
    }
}

/// Explicit cursor protocol; every implementor is also a `std` iterator.
pub trait Cursor<'a> {
    type Item;
    fn has_next(&self) -> bool;
    fn get_next(&mut self) -> Option<Self::Item>;
}

#[derive(Debug, Default)]
pub struct BookCollection {
    books: Vec<Book>,
}

impl BookCollection {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn cursor(&self) -> BookCursor<'_> {
        BookCursor {
            books: &self.books,
            index: 0,
        }
    }

    /// Walks the collection from the last book to the first.
    pub fn reverse_cursor(&self) -> ReverseBookCursor<'_> {
        ReverseBookCursor {
            books: &self.books,
            remaining: self.books.len(),
        }
    }
}

pub struct BookCursor<'a> {
    books: &'a [Book],
    index: usize,
}

impl<'a> Cursor<'a> for BookCursor<'a> {
    type Item = &'a Book;

    fn has_next(&self) -> bool {
        self.index < self.books.len()
    }

    fn get_next(&mut self) -> Option<&'a Book> {
        let book = self.books.get(self.index)?;
        self.index += 1;
        Some(book)
    }
}

impl<'a> Iterator for BookCursor<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<&'a Book> {
        self.get_next()
    }
}

pub struct ReverseBookCursor<'a> {
    books: &'a [Book],
    remaining: usize,
}

impl<'a> Cursor<'a> for ReverseBookCursor<'a> {
    type Item = &'a Book;

    fn has_next(&self) -> bool {
        self.remaining > 0
    }

    fn get_next(&mut self) -> Option<&'a Book> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.books.get(self.remaining)
    }
}

impl<'a> Iterator for ReverseBookCursor<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<&'a Book> {
        self.get_next()
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type Item = &'a Book;
    type IntoIter = BookCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> BookCollection {
        BookCollection::new(vec![
            Book::new("The Great Gatsby", "F. Scott Fitzgerald"),
            Book::new("To Kill a Mockingbird", "Harper Lee"),
            Book::new("Pride and Prejudice", "Jane Austen"),
        ])
    }

    #[test]
    fn test_explicit_protocol() {
        let books = library();
        let mut cursor = books.cursor();
        let mut titles = Vec::new();
        while cursor.has_next() {
            if let Some(book) = cursor.get_next() {
                titles.push(book.title.as_str());
            }
        }
        assert_eq!(titles.len(), 3);
        assert_eq!(titles[0], "The Great Gatsby");
        assert_eq!(cursor.get_next(), None);
    }

    #[test]
    fn test_cursors_are_independent() {
        let books = library();
        let mut a = books.cursor();
        let mut b = books.cursor();

        a.get_next();
        a.get_next();
        assert_eq!(b.get_next().unwrap().author, "F. Scott Fitzgerald");
        assert_eq!(a.get_next().unwrap().author, "Jane Austen");
    }

    #[test]
    fn test_std_iterator_and_reverse() {
        let books = library();
        let authors: Vec<&str> = (&books).into_iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["F. Scott Fitzgerald", "Harper Lee", "Jane Austen"]);

        let reversed: Vec<&str> = books.reverse_cursor().map(|b| b.title.as_str()).collect();
        assert_eq!(reversed[0], "Pride and Prejudice");
        assert_eq!(reversed.len(), books.len());
    }

    #[test]
    fn test_empty_collection() {
        let empty = BookCollection::default();
        assert!(empty.is_empty());
        assert!(!empty.cursor().has_next());
        assert!(!empty.reverse_cursor().has_next());
    }
}
