//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs a MongoDB container for tests.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Collection holding user documents referenced by event owners
pub const USERS_COLLECTION: &str = "users";

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("my_test");
/// mongo.insert_user(&db, "u1", "alice").await;
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
}

impl TestMongo {
    /// Start a MongoDB 7 container and connect to it
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .expect("MongoDB did not answer ping");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self { container, client }
    }

    /// Get a database handle; use a distinct name per test for isolation
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// Insert a user document `{_id: id, username}` into `users`
    pub async fn insert_user(&self, db: &Database, id: &str, username: &str) {
        db.collection(USERS_COLLECTION)
            .insert_one(doc! { "_id": id, "username": username })
            .await
            .expect("Failed to insert test user");
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Document;

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_insert_and_find() {
        let mongo = TestMongo::new().await;
        let db = mongo.database("test_mongo_insert_and_find");

        mongo.insert_user(&db, "u1", "alice").await;

        let user = db
            .collection::<Document>(USERS_COLLECTION)
            .find_one(doc! { "_id": "u1" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.get_str("username").unwrap(), "alice");
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_databases_are_isolated() {
        let mongo = TestMongo::new().await;
        let first = mongo.database("isolation_a");
        let second = mongo.database("isolation_b");

        mongo.insert_user(&first, "u1", "alice").await;

        let count = second
            .collection::<Document>(USERS_COLLECTION)
            .count_documents(doc! {})
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
