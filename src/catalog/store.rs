//! # Book Store
//!
//! In-memory keyed collection of books.
//!
//! Records are keyed by a UUID v4 string for O(1) lookup. A separate id list
//! preserves insertion order for `list`. The store holds no locks; callers
//! sharing it across threads wrap it in one.

use std::collections::HashMap;

use uuid::Uuid;

use super::book::{Book, BookInput, YearValue};
use super::errors::{CatalogError, CatalogResult};

/// The authoritative set of book records
#[derive(Debug, Default)]
pub struct BookStore {
    records: HashMap<String, Book>,
    order: Vec<String>,
}

impl BookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the three sample books
    pub fn with_sample_books() -> Self {
        let mut store = Self::new();
        for input in sample_books() {
            // Sample inputs are statically valid.
            if let Err(e) = store.create(&input) {
                tracing::warn!(error = %e, "skipping invalid sample book");
            }
        }
        store
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> CatalogResult<Book> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Validate, assign a fresh id and store a new record
    pub fn create(&mut self, input: &BookInput) -> CatalogResult<Book> {
        let fields = input.validate()?;
        let book = fields.into_book(self.next_id());

        self.order.push(book.id.clone());
        self.records.insert(book.id.clone(), book.clone());

        tracing::info!(id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Overwrite every field but the id of an existing record.
    ///
    /// An unknown id is reported before the input is validated.
    pub fn update(&mut self, id: &str, input: &BookInput) -> CatalogResult<Book> {
        let existing = self
            .records
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let fields = input.validate()?;
        *existing = fields.into_book(id.to_string());

        tracing::info!(id = %id, "book updated");
        Ok(existing.clone())
    }

    /// Remove a record and return it
    pub fn delete(&mut self, id: &str) -> CatalogResult<Book> {
        let book = self
            .records
            .remove(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if let Some(pos) = self.order.iter().position(|existing| existing == id) {
            self.order.remove(pos);
        }

        tracing::info!(id = %id, "book deleted");
        Ok(book)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }
}

fn sample_books() -> Vec<BookInput> {
    vec![
        BookInput::new("To Kill a Mockingbird", "Harper Lee")
            .with_year(YearValue::Int(1960))
            .with_isbn("978-0061120084"),
        BookInput::new("1984", "George Orwell")
            .with_year(YearValue::Int(1949))
            .with_isbn("978-0451524935"),
        BookInput::new("The Great Gatsby", "F. Scott Fitzgerald")
            .with_year(YearValue::Int(1925))
            .with_isbn("978-0743273565"),
    ]
}
