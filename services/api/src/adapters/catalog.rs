//! services/api/src/adapters/catalog.rs
//!
//! The static catalog adapter: a fixed in-memory book list served behind
//! nominal delays, implementing the `CatalogService` port while standing in
//! for a future real backend.

use std::time::Duration;

use async_trait::async_trait;
use bookdash_core::domain::Book;
use bookdash_core::ports::{CatalogService, StoreError, StoreResult};
use tokio::time::sleep;

/// Delay applied to a full catalog listing.
const LIST_LATENCY: Duration = Duration::from_millis(500);
/// Delay applied to a single-book fetch.
const FETCH_LATENCY: Duration = Duration::from_millis(300);

/// A `CatalogService` over a fixed in-memory book list.
pub struct StaticCatalog {
    books: Vec<Book>,
}

impl StaticCatalog {
    /// Creates the catalog with the seeded book list.
    pub fn new() -> Self {
        Self {
            books: seed_books(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        sleep(LIST_LATENCY).await;
        Ok(self.books.clone())
    }

    async fn get_book(&self, id: &str) -> StoreResult<Book> {
        sleep(FETCH_LATENCY).await;
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Book {} not found", id)))
    }
}

fn book(id: &str, title: &str, category: &str, price: f64, content: [&str; 5]) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        price,
        content: content.iter().map(|line| line.to_string()).collect(),
    }
}

/// The fixed nine-book catalog.
fn seed_books() -> Vec<Book> {
    vec![
        book(
            "1",
            "Angular Essentials",
            "Frontend Development",
            29.99,
            [
                "Line 1: Angular Overview",
                "Line 2: Component Lifecycle",
                "Line 3: Data Binding Techniques",
                "Line 4: Angular CLI & Structure",
                "Line 5: Real-world Use Cases",
            ],
        ),
        book(
            "2",
            "RxJS in Depth",
            "Reactive Programming",
            39.99,
            [
                "Line 1: Understanding Observables",
                "Line 2: Cold vs Hot Observables",
                "Line 3: Operators Deep Dive",
                "Line 4: Error Handling Patterns",
                "Line 5: Practical Examples",
            ],
        ),
        book(
            "3",
            "Mastering TypeScript",
            "Programming Languages",
            24.99,
            [
                "Line 1: TypeScript Basics",
                "Line 2: Interfaces and Types",
                "Line 3: Advanced Typing",
                "Line 4: Decorators and Metadata",
                "Line 5: Configuring TypeScript",
            ],
        ),
        book(
            "4",
            "Node.js Fundamentals",
            "Backend Development",
            34.99,
            [
                "Line 1: Introduction to Node.js",
                "Line 2: Working with Modules",
                "Line 3: File System Access",
                "Line 4: HTTP Module",
                "Line 5: Express Framework",
            ],
        ),
        book(
            "5",
            "MongoDB for Developers",
            "Databases",
            49.99,
            [
                "Line 1: Document-Oriented Data",
                "Line 2: CRUD Operations",
                "Line 3: Aggregation Framework",
                "Line 4: Indexing and Performance",
                "Line 5: Connecting with Mongoose",
            ],
        ),
        book(
            "6",
            "Python for Data Science",
            "Data Science",
            44.99,
            [
                "Line 1: Python Basics",
                "Line 2: Numpy and Pandas",
                "Line 3: Data Visualization",
                "Line 4: Machine Learning Models",
                "Line 5: Scikit-learn and Beyond",
            ],
        ),
        book(
            "7",
            "DevOps Essentials",
            "Operations",
            54.99,
            [
                "Line 1: What is DevOps?",
                "Line 2: CI/CD Concepts",
                "Line 3: Docker & Containerization",
                "Line 4: Kubernetes Basics",
                "Line 5: Monitoring & Logging",
            ],
        ),
        book(
            "8",
            "GraphQL Explained",
            "API Development",
            39.99,
            [
                "Line 1: What is GraphQL?",
                "Line 2: Queries and Mutations",
                "Line 3: Schema Design",
                "Line 4: Apollo Client & Server",
                "Line 5: Real-time with Subscriptions",
            ],
        ),
        book(
            "9",
            "CSS Masterclass",
            "Web Design",
            29.99,
            [
                "Line 1: Flexbox and Grid",
                "Line 2: Responsive Design",
                "Line 3: Animations and Transitions",
                "Line 4: CSS Architecture",
                "Line 5: Modern Frameworks",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn list_returns_all_nine_books() {
        let catalog = StaticCatalog::new();
        let books = catalog.list_books().await.unwrap();
        assert_eq!(books.len(), 9);
        assert_eq!(books[0].id, "1");
    }

    #[tokio::test(start_paused = true)]
    async fn get_book_returns_matching_entry() {
        let catalog = StaticCatalog::new();
        let three = catalog.get_book("3").await.unwrap();
        assert_eq!(three.title, "Mastering TypeScript");
        assert_eq!(three.category, "Programming Languages");
        assert_eq!(three.content.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn get_book_for_unknown_id_is_not_found() {
        let catalog = StaticCatalog::new();
        let err = catalog.get_book("42").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
